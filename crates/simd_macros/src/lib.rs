struct TargetCpu {
    target_cpu: &'static str,
    target_arch: &'static str,
    target_features: &'static [&'static str],
}

const TARGET_CPUS: &[TargetCpu] = &[
    TargetCpu {
        target_cpu: "v4",
        target_arch: "x86_64",
        target_features: &[
            "avx512bw", "avx512cd", "avx512dq", "avx512vl", // simd
            "bmi1", "bmi2", "lzcnt", "movbe", "popcnt", // bit-operations
        ],
    },
    TargetCpu {
        target_cpu: "v3",
        target_arch: "x86_64",
        target_features: &[
            "avx2", "fma", // simd
            "bmi1", "bmi2", "lzcnt", "movbe", "popcnt", // bit-operations
        ],
    },
    TargetCpu {
        target_cpu: "v2",
        target_arch: "x86_64",
        target_features: &[
            "sse4.2", // simd
            "popcnt", // bit-operations
        ],
    },
    TargetCpu {
        target_cpu: "a2",
        target_arch: "aarch64",
        target_features: &[
            "neon", // simd
        ],
    },
];

fn lookup(target_cpu: &str) -> &'static TargetCpu {
    TARGET_CPUS
        .iter()
        .find(|t| t.target_cpu == target_cpu)
        .expect("unknown target_cpu")
}

struct Version {
    target: String,
    import: bool,
}

impl syn::parse::Parse for Version {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let import = input.peek(syn::Token![@]);
        if import {
            let _: syn::Token![@] = input.parse()?;
        }
        let target: syn::LitStr = input.parse()?;
        Ok(Self {
            target: target.value(),
            import,
        })
    }
}

struct Multiversion {
    versions: syn::punctuated::Punctuated<Version, syn::Token![,]>,
}

impl syn::parse::Parse for Multiversion {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        Ok(Multiversion {
            versions: syn::punctuated::Punctuated::parse_terminated(input)?,
        })
    }
}

/// Compiles the annotated function once per listed target cpu and selects the
/// best available specialization at runtime, caching the choice in an atomic
/// pointer. A version written as `@"cpu"` refers to a hand-written kernel
/// named `{fn}_{cpu}` instead of recompiling the fallback body.
#[proc_macro_attribute]
pub fn multiversion(
    attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let attr = syn::parse_macro_input!(attr as Multiversion);
    let item_fn = syn::parse::<syn::ItemFn>(item).expect("not a function item");
    let syn::ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = item_fn;
    if sig.constness.is_some() {
        panic!("const functions are not supported");
    }
    if sig.asyncness.is_some() {
        panic!("async functions are not supported");
    }
    if sig.variadic.is_some() {
        panic!("variadic parameters are not supported");
    }
    for generic_param in sig.generics.params.iter() {
        if !matches!(generic_param, syn::GenericParam::Lifetime(_)) {
            panic!("generic parameters are not supported");
        }
    }
    let name = sig.ident.to_string();
    let generics_params = sig.generics.params.clone();
    let generics_where = sig.generics.where_clause.clone();
    let inputs = sig.inputs.clone();
    let output = sig.output.clone();
    let arguments = sig
        .inputs
        .iter()
        .map(|x| {
            let syn::FnArg::Typed(y) = x else {
                panic!("receiver parameters are not supported")
            };
            let syn::Pat::Ident(ident) = (*y.pat).clone() else {
                panic!("patterns on parameters are not supported")
            };
            ident
        })
        .collect::<Vec<_>>();
    let mut versions = quote::quote! {};
    let mut branches = quote::quote! {};
    for version in attr.versions {
        let target = version.target.clone();
        let ident = syn::Ident::new(
            &format!("{name}_{}", target.replace([':', '.'], "_")),
            proc_macro2::Span::mixed_site(),
        );
        let s = target.split(':').collect::<Vec<&str>>();
        let target_cpu_entry = lookup(s[0]);
        let additional_target_features = s[1..].to_vec();
        let target_arch = target_cpu_entry.target_arch;
        let target_cpu = target_cpu_entry.target_cpu;
        if !version.import {
            versions.extend(quote::quote! {
                #[inline]
                #[cfg(any(target_arch = #target_arch))]
                #[crate::target_cpu(enable = #target_cpu)]
                #(#[target_feature(enable = #additional_target_features)])*
                fn #ident < #generics_params > (#inputs) #output #generics_where { #block }
            });
        }
        branches.extend(quote::quote! {
            #[cfg(target_arch = #target_arch)]
            if crate::is_cpu_detected!(#target_cpu) #(&& crate::is_feature_detected!(#additional_target_features))* {
                let _multiversion_internal: unsafe fn(#inputs) #output = #ident;
                CACHE.store(_multiversion_internal as *mut (), core::sync::atomic::Ordering::Relaxed);
                return unsafe { _multiversion_internal(#(#arguments,)*) };
            }
        });
    }
    quote::quote! {
        #versions
        fn fallback < #generics_params > (#inputs) #output #generics_where { #block }
        #[inline(always)]
        #(#attrs)* #vis #sig {
            static CACHE: core::sync::atomic::AtomicPtr<()> = core::sync::atomic::AtomicPtr::new(core::ptr::null_mut());
            let cache = CACHE.load(core::sync::atomic::Ordering::Relaxed);
            if !cache.is_null() {
                let f = unsafe { core::mem::transmute::<*mut (), unsafe fn(#inputs) #output>(cache as _) };
                return unsafe { f(#(#arguments,)*) };
            }
            #branches
            let _multiversion_internal: unsafe fn(#inputs) #output = fallback;
            CACHE.store(_multiversion_internal as *mut (), core::sync::atomic::Ordering::Relaxed);
            unsafe { _multiversion_internal(#(#arguments,)*) }
        }
    }
    .into()
}

struct TargetCpuAttr {
    enable: String,
}

impl syn::parse::Parse for TargetCpuAttr {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let _: syn::Ident = input.parse()?;
        let _: syn::Token![=] = input.parse()?;
        let enable: syn::LitStr = input.parse()?;
        Ok(Self {
            enable: enable.value(),
        })
    }
}

/// Expands `#[target_cpu(enable = "v3")]` to the `#[target_feature]` set that
/// defines that cpu level.
#[proc_macro_attribute]
pub fn target_cpu(
    attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let attr = syn::parse_macro_input!(attr as TargetCpuAttr);
    let mut result = quote::quote! {};
    for s in attr.enable.split(',') {
        let target_features = lookup(s).target_features;
        result.extend(quote::quote!(
            #(#[target_feature(enable = #target_features)])*
        ));
    }
    result.extend(proc_macro2::TokenStream::from(item));
    result.into()
}

/// Defines the `is_{arch}_cpu_detected!` macro mapping cpu level names to the
/// runtime detection functions of the calling crate.
#[proc_macro]
pub fn define_is_cpu_detected(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let target_arch = syn::parse_macro_input!(input as syn::LitStr).value();
    let mut arms = quote::quote! {};
    for target_cpu in TARGET_CPUS {
        if target_cpu.target_arch != target_arch {
            continue;
        }
        let target_cpu = target_cpu.target_cpu;
        let ident = syn::Ident::new(
            &format!("is_{}_detected", target_cpu.replace('.', "_")),
            proc_macro2::Span::mixed_site(),
        );
        arms.extend(quote::quote! {
            (#target_cpu) => { $crate::internal::#ident() };
        });
    }
    let ident = syn::Ident::new(
        &format!("is_{target_arch}_cpu_detected"),
        proc_macro2::Span::mixed_site(),
    );
    quote::quote! {
        #[macro_export]
        macro_rules! #ident {
            #arms
        }
    }
    .into()
}

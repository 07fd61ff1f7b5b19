//! Derive macros for Ferret property-based testing.
//!
//! This crate provides `#[derive(Arbitrary)]`, which builds the generator
//! and shrink function of a type out of those of its fields.

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Fields, GenericParam, Ident};

/// Derive macro implementing `ferret::Arbitrary`.
///
/// Fields are generated left to right under the ambient size. Shrinking
/// crosses each field's candidates (followed by its current value) and
/// drops the final combination, which rebuilds the input. Enums pick a
/// variant with `Gen::one_of` and shrink within the current variant.
///
/// The size is not reduced between fields, so recursive types should
/// implement `Arbitrary` by hand.
///
/// # Example
///
/// ```rust,ignore
/// use ferret::*;
///
/// #[derive(Arbitrary, Debug, Clone, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let gen = Point::arbitrary();
/// ```
#[proc_macro_derive(Arbitrary)]
pub fn derive_arbitrary(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match arbitrary_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn arbitrary_impl(input: &DeriveInput) -> Result<TokenStream2, syn::Error> {
    let name = &input.ident;
    let mut generics = input.generics.clone();
    for param in &mut generics.params {
        if let GenericParam::Type(type_param) = param {
            type_param.bounds.push(parse_quote!(::ferret::Arbitrary));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let (generator, shrinker) = match &input.data {
        Data::Struct(data) => {
            let shape = Shape::of(&data.fields);
            let constructor = quote!(Self);
            let generator = shape.generator(&constructor);
            let pattern = shape.pattern(&constructor);
            let shrink = shape.shrinker(&constructor);
            let shrinker = quote! {
                let #pattern = self;
                #shrink
            };
            (generator, shrinker)
        }
        Data::Enum(data) => {
            if data.variants.is_empty() {
                return Err(syn::Error::new_spanned(
                    input,
                    "Arbitrary cannot be derived for an enum without variants",
                ));
            }
            let mut generators = Vec::new();
            let mut arms = Vec::new();
            for variant in &data.variants {
                let variant_name = &variant.ident;
                let constructor = quote!(Self::#variant_name);
                let shape = Shape::of(&variant.fields);
                generators.push(shape.generator(&constructor));
                let pattern = shape.pattern(&constructor);
                let shrink = shape.shrinker(&constructor);
                arms.push(quote! {
                    #pattern => { #shrink }
                });
            }
            let generator = quote! {
                ::ferret::Gen::one_of(vec![#(#generators),*])
            };
            let shrinker = quote! {
                match self {
                    #(#arms)*
                }
            };
            (generator, shrinker)
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "Arbitrary derive macro does not support unions",
            ));
        }
    };

    Ok(quote! {
        impl #impl_generics ::ferret::Arbitrary for #name #ty_generics #where_clause {
            fn arbitrary() -> ::ferret::Gen<Self> {
                #generator
            }

            fn shrink(&self) -> ::ferret::Shrinks<Self> {
                #shrinker
            }
        }
    })
}

/// The fields of a struct or enum variant, with generated binding names.
struct Shape {
    kind: ShapeKind,
    bindings: Vec<Ident>,
    types: Vec<syn::Type>,
}

enum ShapeKind {
    Named(Vec<Ident>),
    Unnamed,
    Unit,
}

impl Shape {
    fn of(fields: &Fields) -> Self {
        let types: Vec<syn::Type> = fields.iter().map(|field| field.ty.clone()).collect();
        let bindings = (0..types.len())
            .map(|i| Ident::new(&format!("__field_{i}"), Span::call_site()))
            .collect();
        let kind = match fields {
            Fields::Named(named) => ShapeKind::Named(
                named
                    .named
                    .iter()
                    .filter_map(|field| field.ident.clone())
                    .collect(),
            ),
            Fields::Unnamed(_) => ShapeKind::Unnamed,
            Fields::Unit => ShapeKind::Unit,
        };
        Shape {
            kind,
            bindings,
            types,
        }
    }

    /// `C { a: __field_0, .. }`, `C(__field_0, ..)` or `C`.
    fn pattern(&self, constructor: &TokenStream2) -> TokenStream2 {
        let bindings = &self.bindings;
        match &self.kind {
            ShapeKind::Named(names) => quote!(#constructor { #(#names: #bindings),* }),
            ShapeKind::Unnamed => quote!(#constructor(#(#bindings),*)),
            ShapeKind::Unit => quote!(#constructor),
        }
    }

    /// Draw every field in order, threading the seed, then build the value.
    fn generator(&self, constructor: &TokenStream2) -> TokenStream2 {
        let bindings = &self.bindings;
        let types = &self.types;
        let value = self.pattern(constructor);
        quote! {
            ::ferret::Gen::new(move |_size, seed| {
                #(
                    let (#bindings, seed) =
                        <#types as ::ferret::Arbitrary>::arbitrary().generate(_size, seed);
                )*
                (#value, seed)
            })
        }
    }

    /// Shrink expression over the bindings introduced by [`Shape::pattern`].
    fn shrinker(&self, constructor: &TokenStream2) -> TokenStream2 {
        if self.bindings.is_empty() {
            return quote!(::ferret::shrinks::empty());
        }

        let owned: Vec<Ident> = (0..self.bindings.len())
            .map(|i| Ident::new(&format!("__owned_{i}"), Span::call_site()))
            .collect();
        let bindings = &self.bindings;
        let combined = nested_product(&owned);
        let tuple = nested_tuple(bindings);
        let value = self.pattern(constructor);

        quote! {
            #(
                let #owned = ::core::clone::Clone::clone(#bindings);
            )*
            let __rebuilt: ::ferret::Shrinks<Self> = ::std::boxed::Box::new(
                ::core::iter::Iterator::map(#combined, |#tuple| #value),
            );
            ::ferret::shrinks::drop_last(__rebuilt)
        }
    }
}

/// Cross the `shrink ++ [original]` sequences of `owned[0..]` into nested pairs.
fn nested_product(owned: &[Ident]) -> TokenStream2 {
    let (current, later) = match owned.split_first() {
        Some(split) => split,
        None => return quote!(::ferret::shrinks::empty()),
    };
    if later.is_empty() {
        return quote!(::ferret::shrink_and_keep(&#current));
    }
    let inner = nested_product(later);
    quote! {{
        #(
            let #later = ::core::clone::Clone::clone(&#later);
        )*
        ::ferret::shrinks::cartesian_combine(
            |head, tail| (head, tail),
            ::ferret::shrink_and_keep(&#current),
            move || #inner,
        )
    }}
}

/// `(a, (b, c))` for `[a, b, c]`.
fn nested_tuple(bindings: &[Ident]) -> TokenStream2 {
    match bindings {
        [] => quote!(()),
        [last] => quote!(#last),
        [first, rest @ ..] => {
            let rest = nested_tuple(rest);
            quote!((#first, #rest))
        }
    }
}

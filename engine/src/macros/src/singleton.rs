use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

pub fn derive_singleton(input: TokenStream) -> TokenStream {
    // Parse the input tokens into a syntax tree
    let ast = parse_macro_input!(input as DeriveInput);

    // Get the struct name we are annotating
    let struct_name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    // `::rusty_scene` resolves inside the crate through `extern crate self as rusty_scene;`
    // in lib.rs and outside of it through the regular dependency.
    TokenStream::from(quote! {
        impl #impl_generics ::rusty_scene::singleton::Singleton for #struct_name #ty_generics #where_clause {
            fn create(
                _world: &mut ::rusty_scene::scene::World,
                _host: ::rusty_scene::scene::Entity,
            ) -> ::rusty_scene::Result<Self> {
                ::std::result::Result::Ok(<Self as ::std::default::Default>::default())
            }
        }
    })
}

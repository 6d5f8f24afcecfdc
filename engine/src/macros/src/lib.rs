mod component;
mod singleton;

use proc_macro::TokenStream;

/// Implements `rusty_scene::scene::Component` with every lifecycle hook left at its default.
/// Intended for plain data components such as colliders or tags.
#[proc_macro_derive(Component)]
pub fn derive_component(item: TokenStream) -> TokenStream {
    component::derive_component(item)
}

/// Implements `rusty_scene::singleton::Singleton`, constructing the instance through `Default`.
#[proc_macro_derive(Singleton)]
pub fn derive_singleton(item: TokenStream) -> TokenStream {
    singleton::derive_singleton(item)
}

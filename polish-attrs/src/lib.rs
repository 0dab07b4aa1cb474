mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the [`ErrorKind`] trait for the given struct.
///
/// This trait can be derived for unit structs and structs with named fields.
///
/// The information of the error can be customized using the `error` attribute by adding the
/// corresponding tags to it:
/// ```
/// use polish_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     message = "unexpected end of input",
///     labels = ["add something here"],
///     expected = "an expression",
/// )]
/// pub struct Foo;
/// ```
///
/// The following tags are available:
///
/// | Tag        | Description                                                                   |
/// | ---------- | ----------------------------------------------------------------------------- |
/// | `message`  | The message displayed at the top of the error when it is displayed.           |
/// | `labels`   | The labels pointing at each span of the error, in the same order as the spans. |
/// | `help`     | Optional help text for the error, describing what the user can do to fix it.  |
/// | `expected` | Short description of what the parser expected to find at the error position.  |
///
/// Each tag accepts an expression that should evaluate to a [`String`] (`labels` accepts an
/// iterable of them). For structs with named fields, the expression is evaluated with the members
/// of the struct in scope, so they can be used in the expression (tuple structs are not
/// supported).
///
/// [`ErrorKind`]: ../polish_error/trait.ErrorKind.html
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    quote! {
        impl polish_error::ErrorKind for #name {
            #target
        }
    }.into()
}

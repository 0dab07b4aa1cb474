use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, ToTokens};
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Attribute,
    Data,
    DeriveInput,
    Expr,
    Fields,
    Ident,
    MetaNameValue,
    Result,
    Token,
};

/// The tags of the `error` attribute. Each tag holds the expression written after its `=`.
#[derive(Debug, Default)]
pub struct ErrorTags {
    pub message: Option<Expr>,
    pub labels: Option<Expr>,
    pub help: Option<Expr>,
    pub expected: Option<Expr>,
}

impl ErrorTags {
    /// Collects the tags from the `error` attribute among the given attributes. The attribute is
    /// required, and so is its `message` tag.
    fn from_attrs(name: &Ident, attrs: &[Attribute]) -> Result<Self> {
        let attr = attrs
            .iter()
            .find(|attr| attr.path().is_ident("error"))
            .ok_or_else(|| syn::Error::new(name.span(), "missing `error` attribute"))?;

        let mut tags = Self::default();
        let pairs = attr.parse_args_with(Punctuated::<MetaNameValue, Token![,]>::parse_terminated)?;
        for pair in pairs {
            let slot = match pair.path.get_ident().map(Ident::to_string).as_deref() {
                Some("message") => &mut tags.message,
                Some("labels") => &mut tags.labels,
                Some("help") => &mut tags.help,
                Some("expected") => &mut tags.expected,
                _ => return Err(syn::Error::new_spanned(&pair.path, "unknown tag; expected one of `message`, `labels`, `help`, `expected`")),
            };

            if slot.replace(pair.value).is_some() {
                return Err(syn::Error::new_spanned(&pair.path, "duplicate tag"));
            }
        }

        if tags.message.is_none() {
            return Err(syn::Error::new_spanned(attr, "missing `message` tag in `error` attribute"));
        }

        Ok(tags)
    }
}

/// A struct that `ErrorKind` is being derived for.
#[derive(Debug)]
pub struct ErrorKindTarget {
    pub name: Ident,
    pub fields: Vec<Ident>,
    pub tags: ErrorTags,
}

impl Parse for ErrorKindTarget {
    fn parse(input: ParseStream) -> Result<Self> {
        let input = input.parse::<DeriveInput>()?;
        let Data::Struct(data) = input.data else {
            return Err(syn::Error::new(input.ident.span(), "`ErrorKind` can only be derived for structs"));
        };

        let fields = match data.fields {
            Fields::Named(named) => named.named.into_iter().filter_map(|field| field.ident).collect(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(unnamed) => {
                return Err(syn::Error::new_spanned(unnamed, "`ErrorKind` cannot be derived for tuple structs"));
            },
        };

        let tags = ErrorTags::from_attrs(&input.ident, &input.attrs)?;
        Ok(Self { name: input.ident, fields, tags })
    }
}

impl ErrorKindTarget {
    /// Brings the fields of `self` into scope, so that tag expressions can name them.
    fn bind_fields(&self) -> TokenStream2 {
        if self.fields.is_empty() {
            return TokenStream2::new();
        }

        let fields = &self.fields;
        quote! {
            #[allow(unused_variables)]
            let Self { #(#fields),* } = self;
        }
    }

    /// Generates `build_report`. Labels are paired with spans in order; without a `labels` tag,
    /// every span is highlighted without a message.
    fn report_fn(&self) -> TokenStream2 {
        let bindings = self.bind_fields();
        let message = &self.tags.message;
        let labels = match &self.tags.labels {
            Some(labels) => quote! {
                spans.iter().cloned().zip(#labels).map(|(span, text)| {
                    let text = text.to_string();
                    let label = ariadne::Label::new((src_id, span)).with_color(polish_error::EXPR);
                    if text.is_empty() { label } else { label.with_message(text) }
                })
            },
            None => quote! {
                spans.iter().cloned().map(|span| {
                    ariadne::Label::new((src_id, span)).with_color(polish_error::EXPR)
                })
            },
        };
        let help = self.tags.help.as_ref().map(|help| quote! { builder.set_help(#help); });

        quote! {
            fn build_report<'a>(
                &self,
                src_id: &'a str,
                spans: &[std::ops::Range<usize>],
            ) -> ariadne::Report<(&'a str, std::ops::Range<usize>)> {
                #bindings
                let offset = spans.first().map_or(0, |span| span.start);
                let mut builder = ariadne::Report::build(ariadne::ReportKind::Error, src_id, offset)
                    .with_message(#message)
                    .with_labels((#labels).collect::<Vec<_>>());
                #help
                builder.finish()
            }
        }
    }

    /// Generates `expected`, if the tag was given. Otherwise the trait's default is used.
    fn expected_fn(&self) -> Option<TokenStream2> {
        let expected = self.tags.expected.as_ref()?;
        let bindings = self.bind_fields();
        Some(quote! {
            fn expected(&self) -> String {
                #bindings
                (#expected).to_string()
            }
        })
    }
}

impl ToTokens for ErrorKindTarget {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        tokens.extend(self.report_fn());
        tokens.extend(self.expected_fn());
    }
}

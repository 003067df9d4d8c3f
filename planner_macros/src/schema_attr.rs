use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{
    parse_macro_input, spanned::Spanned, Attribute, Expr, ExprLit, Fields, ItemStruct, Lit,
    LitStr,
};

#[derive(Default)]
struct SchemaArgs {
    name: Option<LitStr>,
    description: Option<LitStr>,
}

impl SchemaArgs {
    fn parse(attr: TokenStream) -> syn::Result<Self> {
        let mut args = SchemaArgs::default();
        if attr.is_empty() {
            return Ok(args);
        }

        let parser = syn::meta::parser(|meta| {
            let slot = if meta.path.is_ident("name") {
                &mut args.name
            } else if meta.path.is_ident("description") {
                &mut args.description
            } else {
                return Err(meta.error("expected `name` or `description`"));
            };

            if slot.is_some() {
                return Err(meta.error("argument given more than once"));
            }
            *slot = Some(meta.value()?.parse()?);
            Ok(())
        });

        syn::parse::Parser::parse(parser, attr)?;
        Ok(args)
    }
}

pub fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = match SchemaArgs::parse(attr) {
        Ok(args) => args,
        Err(err) => return err.to_compile_error().into(),
    };

    let item_struct = parse_macro_input!(item as ItemStruct);

    match build(args, &item_struct) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn build(args: SchemaArgs, item: &ItemStruct) -> syn::Result<proc_macro2::TokenStream> {
    let Fields::Named(named) = &item.fields else {
        return Err(syn::Error::new(
            item.struct_token.span(),
            "`#[completion_schema]` needs a struct with named fields",
        ));
    };

    if !item.generics.params.is_empty() {
        return Err(syn::Error::new(
            item.generics.span(),
            "`#[completion_schema]` cannot be used on generic structs",
        ));
    }

    let ident = &item.ident;
    let type_name = LitStr::new(&ident.to_string(), Span::call_site());
    let schema_name = args.name.unwrap_or_else(|| type_name.clone());

    let description = match args.description {
        Some(lit) => quote! { Some(#lit) },
        None => match doc_text(&item.attrs) {
            Some(text) => {
                let lit = LitStr::new(&text, Span::call_site());
                quote! { Some(#lit) }
            }
            None => quote! { None },
        },
    };

    let field_docs = named.named.iter().filter_map(|field| {
        let name = field.ident.as_ref()?.to_string();
        let doc = doc_text(&field.attrs)?;
        let name = LitStr::new(&name, Span::call_site());
        let doc = LitStr::new(&doc, Span::call_site());
        Some(quote! { (#name, #doc) })
    });

    Ok(quote! {
        #item

        impl itinerary_planner::schema::CompletionSchema for #ident {
            fn schema() -> &'static itinerary_planner::schema::SchemaHandle {
                static HANDLE: std::sync::OnceLock<itinerary_planner::schema::SchemaHandle> =
                    std::sync::OnceLock::new();
                HANDLE.get_or_init(|| {
                    let mut root = schemars::schema_for!(Self);
                    itinerary_planner::schema::apply_doc_comments(
                        &mut root,
                        #schema_name,
                        #description,
                        &[#(#field_docs),*],
                    );
                    itinerary_planner::schema::SchemaHandle::from_root_schema::<Self>(
                        #schema_name,
                        #type_name,
                        root,
                    )
                })
            }
        }
    })
}

/// Joins `///` lines into one paragraph, or `None` when there are none.
fn doc_text(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta.require_name_value().ok()?.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(lit), ..
            }) => Some(lit.value().trim().to_string()),
            _ => None,
        })
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join(" "))
    }
}

//! Record derive macro implementation

use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase,
};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Field, Fields, LitStr, Result};

#[derive(Clone, Copy)]
enum RenameRule {
    Lower,
    Snake,
    LowerCamel,
    UpperCamel,
    ScreamingSnake,
    Kebab,
}

impl RenameRule {
    fn parse(lit: &LitStr) -> Result<Self> {
        Ok(match lit.value().as_str() {
            "lowercase" => RenameRule::Lower,
            "snake_case" => RenameRule::Snake,
            "camelCase" => RenameRule::LowerCamel,
            "PascalCase" => RenameRule::UpperCamel,
            "SCREAMING_SNAKE_CASE" => RenameRule::ScreamingSnake,
            "kebab-case" => RenameRule::Kebab,
            other => {
                return Err(syn::Error::new_spanned(
                    lit,
                    format!("unknown rename_all rule '{other}'"),
                ));
            }
        })
    }

    fn apply(self, name: &str) -> String {
        match self {
            RenameRule::Lower => name.to_lowercase(),
            RenameRule::Snake => name.to_snake_case(),
            RenameRule::LowerCamel => name.to_lower_camel_case(),
            RenameRule::UpperCamel => name.to_upper_camel_case(),
            RenameRule::ScreamingSnake => name.to_shouty_snake_case(),
            RenameRule::Kebab => name.to_kebab_case(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Kind {
    Value,
    Flatten,
    Nested,
}

struct FieldAttrs {
    kind: Kind,
    skip: bool,
    tags: Vec<(String, String)>,
}

fn struct_rename_rule(attrs: &[Attribute]) -> Result<RenameRule> {
    let mut rule = RenameRule::Lower;
    for attr in attrs.iter().filter(|a| a.path().is_ident("record")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                let lit: LitStr = meta.value()?.parse()?;
                rule = RenameRule::parse(&lit)?;
                Ok(())
            } else {
                Err(meta.error("unknown record attribute, expected `rename_all`"))
            }
        })?;
    }
    Ok(rule)
}

fn field_attrs(field: &Field) -> Result<FieldAttrs> {
    let mut out = FieldAttrs {
        kind: Kind::Value,
        skip: false,
        tags: Vec::new(),
    };
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("record")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("flatten") {
                out.kind = Kind::Flatten;
            } else if meta.path.is_ident("nested") {
                out.kind = Kind::Nested;
            } else if meta.path.is_ident("skip") {
                out.skip = true;
            } else if let Some(ident) = meta.path.get_ident() {
                let lit: LitStr = meta.value()?.parse()?;
                let tag = ident.to_string();
                if out.tags.iter().any(|(t, _)| *t == tag) {
                    return Err(meta.error(format!("duplicate `{tag}` annotation")));
                }
                out.tags.push((tag, lit.value()));
            } else {
                return Err(meta.error("expected `flatten`, `nested`, `skip` or `<tag> = \"...\"`"));
            }
            Ok(())
        })?;
    }
    Ok(out)
}

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Record can only be derived for structs",
            ));
        }
    };

    let rule = struct_rename_rule(&input.attrs)?;

    let mut defs = Vec::new();
    let mut values = Vec::new();
    for field in fields {
        let attrs = field_attrs(field)?;
        if attrs.skip {
            continue;
        }
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let ty = &field.ty;
        let rust_name = ident.to_string();
        let rust_name = rust_name.strip_prefix("r#").unwrap_or(&rust_name).to_string();
        let column = rule.apply(&rust_name);
        let tags = attrs.tags.iter().map(|(tag, raw)| quote! { (#tag, #raw) });

        let kind = match attrs.kind {
            Kind::Value => quote! { ::sqlweave::mapper::FieldKind::Value },
            Kind::Flatten => quote! {
                ::sqlweave::mapper::FieldKind::Flatten(<#ty as ::sqlweave::mapper::Record>::fields)
            },
            Kind::Nested => quote! {
                ::sqlweave::mapper::FieldKind::Nested(<#ty as ::sqlweave::mapper::Record>::fields)
            },
        };
        defs.push(quote! {
            ::sqlweave::mapper::FieldDef::value(#rust_name, #column)
                .with_tags(&[#(#tags),*])
                .with_kind(#kind)
        });

        values.push(match attrs.kind {
            Kind::Value => quote! {
                ::sqlweave::mapper::FieldValue::Value(
                    ::sqlweave::Value::from(::core::clone::Clone::clone(&self.#ident))
                )
            },
            Kind::Flatten | Kind::Nested => quote! {
                ::sqlweave::mapper::FieldValue::Record(
                    ::sqlweave::mapper::Record::field_values(&self.#ident)
                )
            },
        });
    }

    Ok(quote! {
        impl #impl_generics ::sqlweave::mapper::Record for #name #ty_generics #where_clause {
            fn fields() -> ::std::vec::Vec<::sqlweave::mapper::FieldDef> {
                ::std::vec![#(#defs),*]
            }

            fn field_values(&self) -> ::std::vec::Vec<::sqlweave::mapper::FieldValue> {
                ::std::vec![#(#values),*]
            }
        }
    })
}

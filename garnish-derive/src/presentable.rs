//! Implementation of the `#[derive(Presentable)]` macro.
//!
//! This module contains the procedural macro implementation that
//! generates the `Presentable` capability impl for named-field structs.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, FieldsNamed, Ident, parse_macro_input};

/// Per-field settings parsed from `#[presentable(...)]` attributes.
#[derive(Default)]
struct FieldSettings {
    skip: bool,
    rename: Option<String>,
    relations: bool,
}

/// Main implementation of the Presentable derive macro.
pub fn derive_presentable_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let expanded = match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(named_fields) => generate_impl(&input, named_fields),
            Fields::Unnamed(_) => syn::Error::new_spanned(
                &input.ident,
                "Presentable can only be derived for structs with named fields, not tuple structs.",
            )
            .to_compile_error(),
            Fields::Unit => syn::Error::new_spanned(
                &input.ident,
                "Presentable cannot be derived for unit structs (structs with no fields).",
            )
            .to_compile_error(),
        },
        Data::Enum(_) => syn::Error::new_spanned(
            &input.ident,
            "Presentable can only be derived for structs, not enums.",
        )
        .to_compile_error(),
        Data::Union(_) => {
            syn::Error::new_spanned(&input.ident, "Presentable cannot be derived for unions.")
                .to_compile_error()
        }
    };

    TokenStream::from(expanded)
}

/// Generates the `Presentable` impl for a named-field struct.
fn generate_impl(input: &DeriveInput, fields: &FieldsNamed) -> TokenStream2 {
    let no_export = match struct_opts_out_of_export(input) {
        Ok(no_export) => no_export,
        Err(error) => return error.to_compile_error(),
    };

    let mut field_arms: Vec<TokenStream2> = Vec::new();
    let mut export_inserts: Vec<TokenStream2> = Vec::new();
    let mut relations_field: Option<Ident> = None;

    for field in &fields.named {
        let settings = match field_settings(field) {
            Ok(settings) => settings,
            Err(error) => return error.to_compile_error(),
        };
        let ident = field
            .ident
            .clone()
            .expect("named field must have an identifier");

        if settings.relations {
            if relations_field.is_some() {
                return syn::Error::new_spanned(
                    field,
                    "only one field may carry #[presentable(relations)].",
                )
                .to_compile_error();
            }
            relations_field = Some(ident);
            continue;
        }
        if settings.skip {
            continue;
        }

        let key = settings.rename.unwrap_or_else(|| ident.to_string());
        field_arms.push(quote! {
            #key => ::core::option::Option::Some(::garnish::value::Value::from(
                ::core::clone::Clone::clone(&self.#ident),
            )),
        });
        export_inserts.push(quote! {
            snapshot.insert(#key, ::garnish::value::Value::from(
                ::core::clone::Clone::clone(&self.#ident),
            ));
        });
    }

    let export_method = if no_export {
        TokenStream2::new()
    } else {
        let capacity = export_inserts.len();
        quote! {
            fn export(&self) -> ::core::option::Option<::garnish::value::Mapping> {
                let mut snapshot = ::garnish::value::Mapping::with_capacity(#capacity);
                #(#export_inserts)*
                ::core::option::Option::Some(snapshot)
            }
        }
    };

    let relation_methods = relations_field.map_or_else(TokenStream2::new, |relations| {
        quote! {
            fn relation_names(&self) -> ::std::vec::Vec<::std::string::String> {
                self.#relations.names()
            }

            fn take_relation(
                &mut self,
                name: &str,
            ) -> ::core::option::Option<::garnish::value::Value> {
                self.#relations.take(name)
            }

            fn put_relation(&mut self, name: &str, value: ::garnish::value::Value) {
                self.#relations.put(name, value);
            }
        }
    });

    let name = &input.ident;
    let (impl_generics, type_generics, where_clause) = input.generics.split_for_impl();

    quote! {
        impl #impl_generics ::garnish::present::Presentable for #name #type_generics #where_clause {
            fn type_key(&self) -> ::garnish::present::TypeKey {
                ::garnish::present::TypeKey::of::<Self>()
            }

            fn clone_presentable(&self) -> ::std::boxed::Box<dyn ::garnish::present::Presentable> {
                ::std::boxed::Box::new(::core::clone::Clone::clone(self))
            }

            fn field(&self, name: &str) -> ::core::option::Option<::garnish::value::Value> {
                match name {
                    #(#field_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            #export_method

            #relation_methods
        }
    }
}

/// Parses the struct-level `#[presentable(no_export)]` attribute.
fn struct_opts_out_of_export(input: &DeriveInput) -> syn::Result<bool> {
    let mut no_export = false;
    for attribute in &input.attrs {
        if !attribute.path().is_ident("presentable") {
            continue;
        }
        attribute.parse_nested_meta(|meta| {
            if meta.path.is_ident("no_export") {
                no_export = true;
                Ok(())
            } else {
                Err(meta.error("unsupported presentable struct attribute"))
            }
        })?;
    }
    Ok(no_export)
}

/// Parses the field-level `#[presentable(...)]` attributes.
fn field_settings(field: &Field) -> syn::Result<FieldSettings> {
    let mut settings = FieldSettings::default();
    for attribute in &field.attrs {
        if !attribute.path().is_ident("presentable") {
            continue;
        }
        attribute.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                settings.skip = true;
                Ok(())
            } else if meta.path.is_ident("relations") {
                settings.relations = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                let literal: syn::LitStr = meta.value()?.parse()?;
                settings.rename = Some(literal.value());
                Ok(())
            } else {
                Err(meta.error("unsupported presentable field attribute"))
            }
        })?;
    }
    Ok(settings)
}

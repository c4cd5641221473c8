//! Declaration emission for parsed interface types
//!
//! Each interface file becomes a small set of declarations: plain data
//! structs for the wire payloads and thin wrapper types bridging them to the
//! client crate's topic/service machinery. Emission is pure; declarations
//! are handed to a [`crate::DeclarationSink`] by the driver.

use proc_macro2::TokenStream;
use quote::quote;

use rosbridge_msg::{Action, Field, Message, RosType, Service, TypeName};

use crate::config::{
    CodegenConfig, FEEDBACK_SUFFIX, GOAL_SUFFIX, REQUEST_SUFFIX, RESPONSE_SUFFIX, RESULT_SUFFIX,
    TOPIC_SUFFIX,
};
use crate::declaration::Declaration;
use crate::errors::{CodegenError, CodegenResult};
use crate::resolve::TypeResolver;
use crate::tokens::{constant_value, ident, parse_type};

/// Marker trait of the client crate implemented by a generated data type
#[derive(Debug, Clone, Copy)]
enum Marker {
    Message,
    ServiceRequest,
    ServiceResponse,
}

impl Marker {
    fn trait_name(self) -> &'static str {
        match self {
            Marker::Message => "Message",
            Marker::ServiceRequest => "ServiceRequest",
            Marker::ServiceResponse => "ServiceResponse",
        }
    }
}

/// Builds declaration trees from parsed interface types
pub struct Emitter<'a> {
    config: &'a CodegenConfig,
    resolver: TypeResolver<'a>,
}

impl<'a> Emitter<'a> {
    /// Create an emitter over the given configuration
    #[must_use]
    pub fn new(config: &'a CodegenConfig) -> Self {
        Self {
            config,
            resolver: TypeResolver::new(config),
        }
    }

    /// Emit the declarations for one parsed interface, in output order
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::InvalidConstantType`] for constants with a
    /// non-primitive type and [`CodegenError::Render`] for constant values
    /// that are not valid literals.
    pub fn emit(&self, ros_type: &RosType) -> CodegenResult<Vec<Declaration>> {
        match ros_type {
            RosType::Message(message) => self.emit_message(message),
            RosType::Service(service) => self.emit_service(service),
            RosType::Action(action) => self.emit_action(action),
        }
    }

    fn emit_message(&self, message: &Message) -> CodegenResult<Vec<Declaration>> {
        Ok(vec![
            self.data_declaration(&message.name, &message.fields, Marker::Message)?,
            self.topic_declaration(message)?,
        ])
    }

    fn emit_service(&self, service: &Service) -> CodegenResult<Vec<Declaration>> {
        Ok(vec![
            self.data_declaration(
                &service.name.with_suffix(REQUEST_SUFFIX),
                &service.request,
                Marker::ServiceRequest,
            )?,
            self.data_declaration(
                &service.name.with_suffix(RESPONSE_SUFFIX),
                &service.response,
                Marker::ServiceResponse,
            )?,
            self.service_declaration(service)?,
        ])
    }

    fn emit_action(&self, action: &Action) -> CodegenResult<Vec<Declaration>> {
        // The goal payload always starts with the goal identifier.
        let mut goal_fields = vec![Field::new(
            TypeName::parse("actionlib_msgs/GoalID"),
            "goal_id",
        )];
        goal_fields.extend(action.goal.iter().cloned());

        Ok(vec![
            self.data_declaration(
                &action.name.with_suffix(GOAL_SUFFIX),
                &goal_fields,
                Marker::Message,
            )?,
            self.data_declaration(
                &action.name.with_suffix(RESULT_SUFFIX),
                &action.result,
                Marker::Message,
            )?,
            self.data_declaration(
                &action.name.with_suffix(FEEDBACK_SUFFIX),
                &action.feedback,
                Marker::Message,
            )?,
        ])
    }

    /// Emit a serde-serializable data struct with a constructor, associated
    /// constants, and the client crate's marker trait
    fn data_declaration(
        &self,
        name: &TypeName,
        fields: &[Field],
        marker: Marker,
    ) -> CodegenResult<Declaration> {
        let package = name.package.as_deref();
        let module = self.config.module_of(package.unwrap_or_default());
        let struct_ident = ident(&name.name);

        let variables: Vec<&Field> = fields.iter().filter(|f| f.is_variable()).collect();

        let mut field_defs = Vec::with_capacity(variables.len());
        let mut params = Vec::with_capacity(variables.len());
        let mut names = Vec::with_capacity(variables.len());
        for field in &variables {
            let field_name = ident(&field.name);
            let field_type = parse_type(&self.resolver.resolve_field(field, package));
            field_defs.push(quote! { pub #field_name: #field_type });
            params.push(quote! { #field_name: #field_type });
            names.push(field_name);
        }

        let constants = fields
            .iter()
            .filter(|f| f.is_constant())
            .map(|c| self.constant_item(c))
            .collect::<CodegenResult<Vec<TokenStream>>>()?;

        let marker_trait = parse_type(&format!(
            "{}::{}",
            self.config.client_crate,
            marker.trait_name()
        ));

        let tokens = quote! {
            #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
            pub struct #struct_ident {
                #(#field_defs,)*
            }

            impl #struct_ident {
                #(#constants)*

                #[must_use]
                pub fn new(#(#params),*) -> Self {
                    Self { #(#names),* }
                }
            }

            impl #marker_trait for #struct_ident {}
        };

        Ok(Declaration::new(module, name.name.clone(), tokens))
    }

    fn constant_item(&self, field: &Field) -> CodegenResult<TokenStream> {
        let const_name = ident(&field.name);
        let type_str = self.resolver.resolve_constant(&field.ty)?;
        let const_type = parse_type(type_str);
        let value = field
            .value
            .as_deref()
            .ok_or_else(|| CodegenError::MissingConstantValue {
                name: field.name.clone(),
            })?;
        let const_value = constant_value(value, type_str == "&'static str")?;
        Ok(quote! { pub const #const_name: #const_type = #const_value; })
    }

    /// Emit the publish wrapper accompanying a message declaration
    fn topic_declaration(&self, message: &Message) -> CodegenResult<Declaration> {
        let package = message.name.package.as_deref();
        let module = self.config.module_of(package.unwrap_or_default());
        let topic_name = message.name.with_suffix(TOPIC_SUFFIX);
        let topic_ident = ident(&topic_name.name);
        let message_ident = ident(&message.name.name);
        let client = parse_type(&self.config.client_crate);
        let ros_name = message.name.to_string();

        let (params, args) = self.wrapper_params(&message.fields, package);

        let tokens = quote! {
            pub struct #topic_ident {
                inner: #client::GenericTopic<super::#message_ident>,
            }

            impl #topic_ident {
                pub fn new(ros: #client::Ros, topic: impl Into<String>) -> Self {
                    Self {
                        inner: #client::GenericTopic::new(ros, topic.into(), #ros_name),
                    }
                }

                pub async fn publish(&self, #(#params),*) -> #client::Result<()> {
                    self.inner
                        .publish(super::#message_ident::new(#(#args),*))
                        .await
                }
            }
        };

        Ok(Declaration::new(module, topic_name.name, tokens))
    }

    /// Emit the call/response wrapper accompanying a service's request and
    /// response declarations
    fn service_declaration(&self, service: &Service) -> CodegenResult<Declaration> {
        let package = service.name.package.as_deref();
        let module = self.config.module_of(package.unwrap_or_default());
        let service_ident = ident(&service.name.name);
        let request_ident = ident(&service.name.with_suffix(REQUEST_SUFFIX).name);
        let response_ident = ident(&service.name.with_suffix(RESPONSE_SUFFIX).name);
        let client = parse_type(&self.config.client_crate);
        let ros_name = service.name.to_string();

        let (call_params, call_args) = self.wrapper_params(&service.request, package);
        let (mut response_params, response_args) = self.wrapper_params(&service.response, package);
        response_params.push(quote! { service_result: bool });
        response_params.push(quote! { service_id: Option<String> });

        let tokens = quote! {
            pub struct #service_ident {
                inner: #client::GenericService<super::#request_ident, super::#response_ident>,
            }

            impl #service_ident {
                pub fn new(ros: #client::Ros, service: impl Into<String>) -> Self {
                    Self {
                        inner: #client::GenericService::new(ros, service.into(), #ros_name),
                    }
                }

                pub async fn call(
                    &self,
                    #(#call_params),*
                ) -> #client::Result<(Option<super::#response_ident>, bool)> {
                    self.inner
                        .call(super::#request_ident::new(#(#call_args),*))
                        .await
                }

                pub async fn send_response(
                    &self,
                    #(#response_params),*
                ) -> #client::Result<()> {
                    self.inner
                        .send_response(
                            super::#response_ident::new(#(#response_args),*),
                            service_result,
                            service_id,
                        )
                        .await
                }
            }
        };

        Ok(Declaration::new(module, service.name.name.clone(), tokens))
    }

    /// Parameter and argument lists mirroring a group's non-constant fields
    fn wrapper_params(
        &self,
        fields: &[Field],
        package: Option<&str>,
    ) -> (Vec<TokenStream>, Vec<TokenStream>) {
        let mut params = Vec::new();
        let mut args = Vec::new();
        for field in fields.iter().filter(|f| f.is_variable()) {
            let name = ident(&field.name);
            let ty = parse_type(&self.resolver.resolve_field(field, package));
            params.push(quote! { #name: #ty });
            args.push(quote! { #name });
        }
        (params, args)
    }
}

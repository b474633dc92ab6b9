use async_graphql::dynamic::{Field, FieldFuture, FieldValue, InputValue, Object, Schema, TypeRef};
use async_graphql::ErrorExtensions;
use async_graphql_parser::parse_schema;
use async_graphql_parser::types as pt;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use nearstay_core::{
    HotelResolver, NearstayError, Operation, RootConfig, SearchRequest, Stash,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Convert parser Type (struct with base+nullable) to dynamic TypeRef.
fn convert_type(ty: &pt::Type) -> TypeRef {
    match (&ty.base, ty.nullable) {
        (pt::BaseType::Named(name), true) => TypeRef::named(name.as_ref()),
        (pt::BaseType::Named(name), false) => TypeRef::named_nn(name.as_ref()),
        (pt::BaseType::List(inner), nullable) => {
            let inner_nn = !inner.nullable;
            let inner_name = base_type_name(inner);
            match (nullable, inner_nn) {
                (true, false) => TypeRef::named_list(inner_name),
                (true, true) => TypeRef::named_list_nn(inner_name),
                (false, false) => TypeRef::named_nn_list(inner_name),
                (false, true) => TypeRef::named_nn_list_nn(inner_name),
            }
        }
    }
}

fn is_scalar(type_name: &str) -> bool {
    matches!(type_name, "String" | "Int" | "Float" | "Boolean" | "ID")
}

fn is_list(ty: &pt::Type) -> bool {
    matches!(ty.base, pt::BaseType::List(_))
}

/// Get the base type name (unwrapping List wrappers).
fn base_type_name(ty: &pt::Type) -> &str {
    match &ty.base {
        pt::BaseType::Named(n) => n.as_ref(),
        pt::BaseType::List(inner) => base_type_name(inner),
    }
}

/// Convert async-graphql ConstValue to serde_json Value.
fn gql_value_to_json(v: &async_graphql::Value) -> serde_json::Value {
    match v {
        async_graphql::Value::Null => serde_json::Value::Null,
        async_graphql::Value::Boolean(b) => serde_json::Value::Bool(*b),
        async_graphql::Value::Number(n) => serde_json::Value::Number(n.clone()),
        async_graphql::Value::String(s) => serde_json::Value::String(s.clone()),
        async_graphql::Value::List(list) => {
            serde_json::Value::Array(list.iter().map(gql_value_to_json).collect())
        }
        async_graphql::Value::Object(obj) => serde_json::Value::Object(
            obj.iter()
                .map(|(k, v)| (k.to_string(), gql_value_to_json(v)))
                .collect(),
        ),
        async_graphql::Value::Enum(name) => serde_json::Value::String(name.to_string()),
        async_graphql::Value::Binary(b) => serde_json::Value::String(BASE64.encode(b)),
    }
}

fn to_gql_error(err: NearstayError) -> async_graphql::Error {
    async_graphql::Error::new(err.to_string()).extend_with(|_, ext| ext.set("code", err.code()))
}

/// Wrap a JSON document so child fields can read it as their parent.
fn document_value(value: serde_json::Value) -> Option<FieldValue<'static>> {
    match value {
        serde_json::Value::Object(doc) => Some(FieldValue::owned_any(doc)),
        serde_json::Value::Array(items) => Some(FieldValue::list(
            items.into_iter().filter_map(document_value),
        )),
        _ => None,
    }
}

/// Scalar field: extract value from parent Stash and convert to GraphQL value.
fn scalar_field(field_name: String, type_ref: TypeRef) -> Field {
    Field::new(field_name.clone(), type_ref, move |ctx| {
        let fname = field_name.clone();
        FieldFuture::new(async move {
            let stash = ctx.parent_value.try_downcast_ref::<Stash>()?;
            Ok(stash.get(&fname).filter(|v| !v.is_null()).map(|v| {
                let gql_val = async_graphql::to_value(v).unwrap_or(async_graphql::Value::Null);
                FieldValue::value(gql_val)
            }))
        })
    })
}

/// Nested object field (`geo`, `location`) or list of objects (`reviews`, `hotels`).
fn nested_field(field_name: String, type_ref: TypeRef, list: bool) -> Field {
    Field::new(field_name.clone(), type_ref, move |ctx| {
        let fname = field_name.clone();
        FieldFuture::new(async move {
            let stash = ctx.parent_value.try_downcast_ref::<Stash>()?;
            let value = match stash.get(&fname) {
                Some(v @ serde_json::Value::Array(_)) if list => v.clone(),
                Some(v @ serde_json::Value::Object(_)) if !list => v.clone(),
                _ => return Ok(FieldValue::NONE),
            };
            Ok(document_value(value))
        })
    })
}

/// Null field: returns None (for query fields with no bound operation).
fn null_field(field_name: String, type_ref: TypeRef) -> Field {
    Field::new(field_name, type_ref, |_ctx| {
        FieldFuture::new(async move { Ok(FieldValue::NONE) })
    })
}

fn operation_field(
    field_name: String,
    type_ref: TypeRef,
    operation: Operation,
    resolver: Arc<dyn HotelResolver>,
) -> Field {
    Field::new(field_name.clone(), type_ref, move |ctx| {
        let r = Arc::clone(&resolver);
        let fname = field_name.clone();
        FieldFuture::new(async move {
            let mut args = Stash::new();
            for (k, v) in ctx.args.iter() {
                args.insert(k.to_string(), gql_value_to_json(v.as_value()));
            }
            debug!("{} called with {} args", fname, args.len());

            match operation {
                Operation::HotelsNearAirport => {
                    let request: SearchRequest =
                        serde_json::from_value(serde_json::Value::Object(args)).map_err(|e| {
                            to_gql_error(NearstayError::InvalidInput(e.to_string()))
                        })?;
                    let result = r
                        .hotels_near_airport(&request)
                        .await
                        .map_err(to_gql_error)?;
                    let value = serde_json::to_value(result)
                        .map_err(|e| async_graphql::Error::new(e.to_string()))?;
                    Ok(document_value(value))
                }
                Operation::HotelsInCity => {
                    let city = args
                        .get("city")
                        .and_then(|v| v.as_str())
                        .unwrap_or_default()
                        .to_string();
                    let hotels = r.hotels_in_city(&city).await.map_err(to_gql_error)?;
                    let items: Vec<FieldValue> =
                        hotels.into_iter().map(FieldValue::owned_any).collect();
                    Ok(Some(FieldValue::list(items)))
                }
            }
        })
    })
}

/// Build a complete dynamic Schema from a GraphQL SDL + RootConfig + HotelResolver.
pub fn build_schema(
    schema_text: &str,
    root_config: &RootConfig,
    resolver: Arc<dyn HotelResolver>,
) -> async_graphql::Result<Schema> {
    let service_doc = parse_schema(schema_text)
        .map_err(|e| async_graphql::Error::new(format!("Schema parse error: {e}")))?;

    // Collect object type definitions keyed by name
    let mut object_types: HashMap<String, Vec<pt::FieldDefinition>> = HashMap::new();
    for def in &service_doc.definitions {
        if let pt::TypeSystemDefinition::Type(td) = def {
            let type_def = &td.node;
            if let pt::TypeKind::Object(obj) = &type_def.kind {
                let name = type_def.name.node.to_string();
                let fields: Vec<pt::FieldDefinition> =
                    obj.fields.iter().map(|f| f.node.clone()).collect();
                object_types.insert(name, fields);
            }
        }
    }

    let mut schema_builder = Schema::build("Query", None, None);

    if let Some(query_fields) = object_types.get("Query") {
        let mut query_obj = Object::new("Query");

        for field_def in query_fields {
            let field_name = field_def.name.node.to_string();
            let field_type = convert_type(&field_def.ty.node);

            let mut gql_field = match root_config.get_operation(&field_name) {
                Some(operation) => {
                    operation_field(field_name, field_type, operation, Arc::clone(&resolver))
                }
                None => {
                    warn!("Query field {} has no bound operation", field_name);
                    null_field(field_name, field_type)
                }
            };

            for arg_def in &field_def.arguments {
                let arg_name = arg_def.node.name.node.to_string();
                let arg_type = convert_type(&arg_def.node.ty.node);
                gql_field = gql_field.argument(InputValue::new(arg_name, arg_type));
            }

            query_obj = query_obj.field(gql_field);
        }

        schema_builder = schema_builder.register(query_obj);
    }

    // Document types: scalars read straight from the JSON, everything else nests
    for (type_name, fields) in &object_types {
        if type_name == "Query" {
            continue;
        }

        let mut entity_obj = Object::new(type_name.as_str());

        for field_def in fields {
            let field_name = field_def.name.node.to_string();
            let field_type = convert_type(&field_def.ty.node);
            let base_name = base_type_name(&field_def.ty.node);

            let field = if is_scalar(base_name) {
                scalar_field(field_name, field_type)
            } else if object_types.contains_key(base_name) {
                nested_field(field_name, field_type, is_list(&field_def.ty.node))
            } else {
                null_field(field_name, field_type)
            };
            entity_obj = entity_obj.field(field);
        }

        schema_builder = schema_builder.register(entity_obj);
    }

    schema_builder
        .finish()
        .map_err(|e| async_graphql::Error::new(e.to_string()))
}

/// Axum Router serving a GraphQL schema at the given path.
pub struct GraphletteRouter;

impl GraphletteRouter {
    pub fn build(path: &str, schema: Schema) -> Router {
        let schema = Arc::new(schema);
        Router::new().route(
            path,
            post(move |body: axum::body::Bytes| {
                let schema = Arc::clone(&schema);
                async move {
                    let request: async_graphql::Request = match serde_json::from_slice(&body) {
                        Ok(r) => r,
                        Err(e) => {
                            return (
                                StatusCode::BAD_REQUEST,
                                axum::Json(serde_json::json!({
                                    "errors": [{"message": e.to_string()}]
                                })),
                            )
                                .into_response();
                        }
                    };
                    let response = schema.execute(request).await;
                    let body = serde_json::json!({
                        "data": response.data,
                        "errors": if response.errors.is_empty() {
                            serde_json::Value::Null
                        } else {
                            serde_json::to_value(&response.errors).unwrap_or(serde_json::Value::Null)
                        },
                    });
                    axum::Json(body).into_response()
                }
            }),
        )
    }
}

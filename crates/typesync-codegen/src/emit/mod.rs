//! Code emitter.
//!
//! Walks the planned endpoints and the frozen alias table and renders the
//! types and request helper artifacts through the handlebars templates.
//! Output depends only on its inputs: alias declarations keep discovery
//! order and endpoints keep input order, so unchanged input gives
//! byte-identical text.

pub mod typescript;

use crate::graph::{FrozenAliases, TypeNode};
use crate::template_engine::{REQUESTS_TEMPLATE, TYPES_TEMPLATE, TemplateEngine};
use serde::Serialize;
use std::collections::HashSet;
use typesync_core::{
    Diagnostic, DiagnosticCode, Diagnostics, EndpointName, Error, HttpMethod, PathPattern,
    PathSegment, Result,
};

/// One request function of an endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodPlan {
    /// HTTP method
    pub method: HttpMethod,
    /// Generated function name
    pub function: String,
}

/// Everything the emitter needs to know about one endpoint.
#[derive(Debug, Clone)]
pub struct EndpointPlan {
    /// Derived endpoint name
    pub name: EndpointName,
    /// Parsed path pattern
    pub pattern: PathPattern,
    /// Name of the Args declaration
    pub args_type_name: String,
    /// Name of the Return declaration
    pub return_type_name: String,
    /// Name of the URL helper
    pub url_function: String,
    /// Request functions in canonical method order
    pub methods: Vec<MethodPlan>,
    /// Args shape; `undefined` when the endpoint takes nothing
    pub args: TypeNode,
    /// Return shape
    pub returns: TypeNode,
    /// Args key carrying the request body
    pub body_key: Option<String>,
}

impl EndpointPlan {
    fn declared_names(&self) -> impl Iterator<Item = &str> {
        [
            self.args_type_name.as_str(),
            self.return_type_name.as_str(),
            self.url_function.as_str(),
        ]
        .into_iter()
        .chain(self.methods.iter().map(|m| m.function.as_str()))
    }
}

/// Rendered artifacts of one run.
#[derive(Debug, Clone)]
pub struct EmitOutput {
    /// Types module text
    pub types: String,
    /// Request helpers module text
    pub requests: String,
    /// Diagnostics raised while emitting
    pub diagnostics: Diagnostics,
    /// Endpoints that made it into the output
    pub emitted: Vec<EndpointName>,
}

#[derive(Serialize)]
struct AliasDecl<'a> {
    name: &'a str,
    definition: String,
}

#[derive(Serialize)]
struct TypeDecl<'a> {
    args_type_name: &'a str,
    args_type: String,
    return_type_name: &'a str,
    return_type: String,
}

#[derive(Serialize)]
struct TypesContext<'a> {
    aliases: Vec<AliasDecl<'a>>,
    endpoints: Vec<TypeDecl<'a>>,
}

#[derive(Serialize)]
struct RequestMethod<'a> {
    name: &'a str,
    method: &'static str,
    params: String,
    return_type_name: &'a str,
    url_call: String,
    body_arg: String,
}

#[derive(Serialize)]
struct RequestEndpoint<'a> {
    url_function: &'a str,
    params: String,
    url: String,
    methods: Vec<RequestMethod<'a>>,
}

#[derive(Serialize)]
struct RequestsContext<'a> {
    types_import: &'a str,
    endpoints: Vec<RequestEndpoint<'a>>,
    exports: Vec<&'a str>,
}

/// Renders the two artifacts.
#[derive(Debug)]
pub struct Emitter<'e, 'reg> {
    engine: &'e TemplateEngine<'reg>,
    types_import: String,
    base_url: String,
}

impl<'e, 'reg> Emitter<'e, 'reg> {
    /// Creates an emitter.
    ///
    /// `types_import` is the module specifier the requests module imports
    /// the types from; `base_url` prefixes every generated URL.
    #[must_use]
    pub fn new(
        engine: &'e TemplateEngine<'reg>,
        types_import: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            engine,
            types_import: types_import.into(),
            base_url: base_url.into(),
        }
    }

    /// Emits `plans` against the frozen `aliases`.
    ///
    /// An endpoint whose generated names clash with an earlier endpoint's
    /// is dropped with a fatal `duplicate-name` diagnostic.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AliasCycleUnresolved`] if an emitted node refers to an
    /// alias missing from `aliases`, or a template error if rendering fails.
    pub fn emit(&self, plans: &[EndpointPlan], aliases: &FrozenAliases) -> Result<EmitOutput> {
        let mut diagnostics = Diagnostics::new();
        let accepted = Self::dedupe(plans, &mut diagnostics);

        for (name, definition) in aliases.iter() {
            Self::validate_references(definition, aliases)
                .inspect_err(|_| tracing::error!(alias = name, "alias definition is dangling"))?;
        }
        for plan in &accepted {
            Self::validate_references(&plan.args, aliases)?;
            Self::validate_references(&plan.returns, aliases)?;
        }

        let types = self.engine.render(TYPES_TEMPLATE, &Self::types_context(&accepted, aliases))?;
        let requests = self
            .engine
            .render(REQUESTS_TEMPLATE, &self.requests_context(&accepted))?;

        tracing::info!(
            endpoints = accepted.len(),
            aliases = aliases.len(),
            "emitted client modules"
        );

        Ok(EmitOutput {
            types,
            requests,
            diagnostics,
            emitted: accepted.iter().map(|p| p.name.clone()).collect(),
        })
    }

    fn dedupe<'p>(plans: &'p [EndpointPlan], diagnostics: &mut Diagnostics) -> Vec<&'p EndpointPlan> {
        let mut taken: HashSet<&str> = HashSet::new();
        let mut accepted = Vec::new();

        for plan in plans {
            let mut own = HashSet::new();
            let clash = plan
                .declared_names()
                .find(|name| taken.contains(name) || !own.insert(*name));
            if let Some(name) = clash {
                diagnostics.push(Diagnostic::fatal(
                    DiagnosticCode::DuplicateName,
                    plan.name.as_str(),
                    format!("generated name '{name}' is already in use; endpoint skipped"),
                ));
                continue;
            }
            taken.extend(own);
            accepted.push(plan);
        }

        accepted
    }

    fn validate_references(node: &TypeNode, aliases: &FrozenAliases) -> Result<()> {
        match node.alias_names().into_iter().find(|name| !aliases.contains(name)) {
            Some(alias) => Err(Error::AliasCycleUnresolved {
                alias: alias.to_string(),
            }),
            None => Ok(()),
        }
    }

    fn types_context<'a>(plans: &[&'a EndpointPlan], aliases: &'a FrozenAliases) -> TypesContext<'a> {
        TypesContext {
            aliases: aliases
                .iter()
                .map(|(name, definition)| AliasDecl {
                    name,
                    definition: typescript::render(definition),
                })
                .collect(),
            endpoints: plans
                .iter()
                .map(|&plan| TypeDecl {
                    args_type_name: &plan.args_type_name,
                    args_type: typescript::render(&plan.args),
                    return_type_name: &plan.return_type_name,
                    return_type: typescript::render(&plan.returns),
                })
                .collect(),
        }
    }

    fn requests_context<'a>(&'a self, plans: &[&'a EndpointPlan]) -> RequestsContext<'a> {
        let mut exports = Vec::new();
        let endpoints = plans
            .iter()
            .map(|&plan| {
                let takes_params = !plan.args.is_undefined();
                let params = if takes_params {
                    format!("params: types.{}", plan.args_type_name)
                } else {
                    String::new()
                };
                let url_call = format!(
                    "{}({})",
                    plan.url_function,
                    if takes_params { "params" } else { "" }
                );
                let body_arg = plan
                    .body_key
                    .as_deref()
                    .map(|key| format!(", params{}", property_access(key)))
                    .unwrap_or_default();

                exports.push(plan.url_function.as_str());
                exports.extend(plan.methods.iter().map(|m| m.function.as_str()));

                RequestEndpoint {
                    url_function: &plan.url_function,
                    params: params.clone(),
                    url: self.url_template(&plan.pattern),
                    methods: plan
                        .methods
                        .iter()
                        .map(|m| RequestMethod {
                            name: &m.function,
                            method: m.method.as_str(),
                            params: params.clone(),
                            return_type_name: &plan.return_type_name,
                            url_call: url_call.clone(),
                            body_arg: body_arg.clone(),
                        })
                        .collect(),
                }
            })
            .collect();

        RequestsContext {
            types_import: &self.types_import,
            endpoints,
            exports,
        }
    }

    /// Body of a template literal building the URL for `pattern`.
    fn url_template(&self, pattern: &PathPattern) -> String {
        let mut url = escape_template_literal(self.base_url.trim_end_matches('/'));
        for segment in pattern.segments() {
            match segment {
                PathSegment::Static(text) => url.push_str(&escape_template_literal(text)),
                PathSegment::Placeholder { name, .. } => {
                    url.push_str(&format!(
                        "${{encodeURIComponent(String(params{}))}}",
                        property_access(name)
                    ));
                }
            }
        }
        url
    }
}

fn property_access(key: &str) -> String {
    if crate::naming::is_identifier(key) {
        format!(".{key}")
    } else {
        format!("[{}]", typescript::property_key(key))
    }
}

fn escape_template_literal(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

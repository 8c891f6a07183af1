//! One generation run, from endpoint descriptors to the two client modules.
//!
//! The run has three passes:
//!
//! 1. **Plan**: filter skipped endpoints, parse path patterns, check them
//!    against the declared arguments and compute every generated name.
//!    Problems here, including names clashing with an earlier endpoint's,
//!    are fatal for the endpoint only.
//! 2. **Build**: translate argument, body and return types through one
//!    shared [`TypeGraphBuilder`], so aliases are discovered in endpoint
//!    order.
//! 3. **Emit**: freeze the alias table and render both modules.
//!
//! # Examples
//!
//! ```
//! use typesync_codegen::Generator;
//! use typesync_core::{ArgumentSpec, Endpoint, GenerationConfig, RawType};
//!
//! let generator = Generator::new(GenerationConfig::default()).unwrap();
//! let endpoints = vec![
//!     Endpoint::new("with_args", "/with/<arg>/args")
//!         .with_argument("arg", ArgumentSpec::annotated(RawType::Bool))
//!         .returning(RawType::Int),
//! ];
//!
//! let generation = generator.run(&endpoints).unwrap();
//! assert!(generation.types().contains("export type WithArgsArgsType = { arg: boolean };"));
//! assert!(generation.requests().contains("async function getWithArgs("));
//! ```

use crate::consistency::check_endpoint;
use crate::converter::{ConverterMapper, DEFAULT_CONVERTER};
use crate::emit::{EndpointPlan, Emitter, MethodPlan};
use crate::graph::{Field, PrimitiveKind, TypeGraphBuilder, TypeNode};
use crate::naming::{function_name_map, is_identifier, name_map, to_pascal_case};
use crate::template_engine::TemplateEngine;
use crate::translate::{Translator, TranslatorRegistry};
use crate::types::{GeneratedCode, GeneratedFile, Generation};
use std::collections::HashSet;
use typesync_core::{
    Diagnostic, DiagnosticCode, Diagnostics, Endpoint, EndpointName, Error, GenerationConfig,
    PathPattern, RawType, Result, TypeDefinitions, Visibility,
};

/// Endpoint that passed planning, with its names fixed.
#[derive(Debug)]
struct Planned<'e> {
    endpoint: &'e Endpoint,
    name: EndpointName,
    pattern: PathPattern,
    args_type_name: String,
    return_type_name: String,
    url_function: String,
    methods: Vec<MethodPlan>,
}

impl Planned<'_> {
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

/// Drives generation runs.
///
/// A generator is configured once and can run any number of times; every
/// run gets a fresh alias table, so runs never influence each other.
///
/// # Examples
///
/// ```
/// use typesync_codegen::Generator;
/// use typesync_core::GenerationConfig;
///
/// let generator = Generator::new(GenerationConfig::default()).unwrap();
/// assert_eq!(generator.translator_ids().first(), Some(&"builtin.response"));
/// ```
#[derive(Debug)]
pub struct Generator<'a> {
    config: GenerationConfig,
    registry: TranslatorRegistry,
    converters: ConverterMapper,
    definitions: TypeDefinitions,
    engine: TemplateEngine<'a>,
}

impl Generator<'_> {
    /// Creates a generator with the built-in translators and converters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the configuration is invalid or a
    /// naming format does not render to an identifier, and a template error
    /// if the built-in templates fail to register.
    pub fn new(config: GenerationConfig) -> Result<Self> {
        config.validate()?;
        let engine = TemplateEngine::new()?;
        Self::check_formats(&engine, &config)?;

        tracing::debug!(
            types_module = %config.types_module,
            requests_module = %config.requests_module,
            strict = config.strict,
            "generator configured"
        );

        Ok(Self {
            config,
            registry: TranslatorRegistry::new(),
            converters: ConverterMapper::new(),
            definitions: TypeDefinitions::new(),
            engine,
        })
    }

    fn check_formats(engine: &TemplateEngine<'_>, config: &GenerationConfig) -> Result<()> {
        let route = name_map("sample_endpoint", "");
        let function = function_name_map("sample_endpoint", "GET");
        let naming = &config.naming;

        for (label, format, data) in [
            ("args type", &naming.args_type, &route),
            ("return type", &naming.return_type, &route),
            ("function", &naming.function, &function),
        ] {
            let rendered = engine
                .render_format(format, data)
                .map_err(|e| Error::ConfigError {
                    message: format!("{label} name format is invalid: {e}"),
                })?;
            if !is_identifier(&rendered) {
                return Err(Error::ConfigError {
                    message: format!(
                        "{label} name format '{format}' renders '{rendered}', which is not an identifier"
                    ),
                });
            }
        }
        Ok(())
    }

    /// Replaces the named type declarations that `named` raw types refer to.
    #[must_use]
    pub fn with_definitions(mut self, definitions: TypeDefinitions) -> Self {
        self.definitions = definitions;
        self
    }

    /// Registers an extension translator, tried before every built-in.
    pub fn register_translator(&mut self, translator: impl Translator + 'static) {
        self.registry.register(translator);
    }

    /// Registers a custom path converter typed by `raw`.
    pub fn register_converter(&mut self, name: impl Into<String>, raw: RawType) {
        self.converters.register(name, raw);
    }

    /// Translator identifiers in dispatch order.
    #[must_use]
    pub fn translator_ids(&self) -> Vec<&str> {
        self.registry.ids().collect()
    }

    /// The configuration this generator runs with.
    #[must_use]
    pub const fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Runs the pipeline over `endpoints`.
    ///
    /// Endpoint-level problems never fail the run: they are reported as
    /// fatal diagnostics and the endpoint is left out of the output.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [`Error::AliasCycleUnresolved`] if an emitted reference has no alias
    /// - [`Error::StrictModeViolation`] in strict mode, if any emitted type
    ///   degraded to `any`
    /// - A template error if rendering fails
    pub fn run(&self, endpoints: &[Endpoint]) -> Result<Generation> {
        tracing::info!(endpoints = endpoints.len(), "starting generation run");

        let mut diagnostics = Diagnostics::new();
        let mut builder = TypeGraphBuilder::new(&self.registry, &self.definitions, &self.config);

        let mut planned = Vec::new();
        for endpoint in endpoints {
            let name = endpoint.derived_name();
            if let Some(reason) = self.skip_reason(endpoint) {
                diagnostics.push(Diagnostic::info(DiagnosticCode::EndpointSkipped, name.as_str(), reason));
                continue;
            }
            match self.plan(endpoint, name) {
                Ok(plan) => planned.push(plan),
                Err(e) if !e.is_run_level() => {
                    let code = if e.is_invalid_descriptor() {
                        DiagnosticCode::InvalidPattern
                    } else {
                        DiagnosticCode::AmbiguousPath
                    };
                    diagnostics.push(Diagnostic::fatal(code, endpoint.derived_name().as_str(), e.to_string()));
                }
                Err(e) => return Err(e),
            }
        }
        let planned = Self::reject_duplicates(planned, &mut diagnostics);

        // Alias names must not shadow any declaration the types module emits
        for plan in &planned {
            builder.aliases_mut().reserve(plan.args_type_name.clone());
            builder.aliases_mut().reserve(plan.return_type_name.clone());
        }

        let plans: Vec<EndpointPlan> = planned
            .into_iter()
            .map(|plan| self.build(plan, &mut builder))
            .collect();

        let (aliases, build_diagnostics) = builder.finish();
        diagnostics.extend(build_diagnostics);

        let emitter = Emitter::new(
            &self.engine,
            self.config.types_import_path(),
            self.config.base_url.as_str(),
        );
        let output = emitter.emit(&plans, &aliases)?;
        diagnostics.extend(output.diagnostics);

        if self.config.strict {
            let mut remaining: HashSet<&EndpointName> = output.emitted.iter().collect();
            let unknown_count = plans
                .iter()
                .filter(|plan| remaining.remove(&plan.name))
                .map(|plan| plan.args.unknown_count() + plan.returns.unknown_count())
                .sum::<usize>()
                + aliases.iter().map(|(_, def)| def.unknown_count()).sum::<usize>();
            if unknown_count > 0 {
                tracing::error!(unknown_count, "strict mode violation");
                return Err(Error::StrictModeViolation { unknown_count });
            }
        }

        let mut code = GeneratedCode::new();
        code.add_file(GeneratedFile {
            path: self.config.types_module.clone(),
            content: output.types,
        });
        code.add_file(GeneratedFile {
            path: self.config.requests_module.clone(),
            content: output.requests,
        });

        tracing::info!(
            emitted = output.emitted.len(),
            aliases = aliases.len(),
            diagnostics = diagnostics.len(),
            "generation run complete"
        );

        Ok(Generation {
            code,
            diagnostics,
            aliases,
            emitted: output.emitted,
        })
    }

    fn skip_reason(&self, endpoint: &Endpoint) -> Option<&'static str> {
        if endpoint.meta.ignore {
            Some("endpoint is marked as ignored")
        } else if endpoint.meta.visibility == Visibility::Internal && !self.config.include_internal {
            Some("endpoint is internal")
        } else if endpoint.returns.is_none() && self.config.skip_unannotated {
            Some("endpoint has no return annotation")
        } else {
            None
        }
    }

    /// Drops endpoints whose generated names clash with an earlier one's,
    /// before any of their types reach the alias table.
    fn reject_duplicates<'e>(planned: Vec<Planned<'e>>, diagnostics: &mut Diagnostics) -> Vec<Planned<'e>> {
        let mut taken: HashSet<String> = HashSet::new();
        let mut accepted = Vec::with_capacity(planned.len());

        for plan in planned {
            let mut own: HashSet<&str> = HashSet::new();
            let clash = plan
                .declared_names()
                .find(|name| taken.contains(*name) || !own.insert(*name));
            if let Some(name) = clash {
                diagnostics.push(Diagnostic::fatal(
                    DiagnosticCode::DuplicateName,
                    plan.name.as_str(),
                    format!("generated name '{name}' is already in use; endpoint skipped"),
                ));
                continue;
            }
            taken.extend(own.into_iter().map(str::to_string));
            accepted.push(plan);
        }

        accepted
    }

    fn plan<'e>(&self, endpoint: &'e Endpoint, name: EndpointName) -> Result<Planned<'e>> {
        let pattern = endpoint.pattern()?;
        check_endpoint(endpoint, &pattern)?;

        if let Some(body) = &endpoint.body
            && endpoint.arguments.contains_key(&body.key)
        {
            return Err(Error::AmbiguousPath {
                endpoint: name.into_inner(),
                reason: format!("body key '{}' collides with a path argument", body.key),
            });
        }

        let route = name_map(name.as_str(), "");
        let naming = &self.config.naming;
        let args_type_name = self.engine.render_format(&naming.args_type, &route)?;
        let return_type_name = self.engine.render_format(&naming.return_type, &route)?;
        let url_function = format!("urlFor{}", to_pascal_case(name.as_str()));

        let methods = endpoint
            .canonical_methods()
            .into_iter()
            .map(|method| {
                let data = function_name_map(name.as_str(), method.as_str());
                self.engine
                    .render_format(&naming.function, &data)
                    .map(|function| MethodPlan { method, function })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            endpoint = name.as_str(),
            path = %endpoint.path,
            methods = methods.len(),
            "planned endpoint"
        );

        Ok(Planned {
            endpoint,
            name,
            pattern,
            args_type_name,
            return_type_name,
            url_function,
            methods,
        })
    }

    fn build(&self, plan: Planned<'_>, builder: &mut TypeGraphBuilder<'_>) -> EndpointPlan {
        let endpoint = plan.endpoint;

        let mut fields: Vec<Field> = plan
            .pattern
            .placeholder_names()
            .map(|arg| Field::required(arg, self.argument_type(endpoint, &plan.pattern, arg, builder)))
            .collect();
        if let Some(body) = &endpoint.body {
            fields.push(Field::required(body.key.clone(), builder.build(&body.ty)));
        }
        let args = if fields.is_empty() {
            TypeNode::primitive(PrimitiveKind::Undefined)
        } else {
            TypeNode::Object { fields }
        };

        let returns = endpoint
            .returns
            .as_ref()
            .map_or_else(TypeNode::any, |raw| builder.build(raw));

        tracing::debug!(endpoint = plan.name.as_str(), "built endpoint types");

        EndpointPlan {
            name: plan.name,
            pattern: plan.pattern,
            args_type_name: plan.args_type_name,
            return_type_name: plan.return_type_name,
            url_function: plan.url_function,
            methods: plan.methods,
            args,
            returns,
            body_key: endpoint.body.as_ref().map(|b| b.key.clone()),
        }
    }

    /// Annotation first, then a custom converter, then the built-in table.
    fn argument_type(
        &self,
        endpoint: &Endpoint,
        pattern: &PathPattern,
        arg: &str,
        builder: &mut TypeGraphBuilder<'_>,
    ) -> TypeNode {
        let spec = endpoint.arguments.get(arg);
        if let Some(annotation) = spec.and_then(|s| s.annotation.as_ref()) {
            return builder.build(annotation);
        }

        let converter = spec
            .and_then(|s| s.converter.as_deref())
            .or_else(|| pattern.converter_for(arg))
            .unwrap_or(DEFAULT_CONVERTER);
        if let Some(raw) = self.converters.custom(converter) {
            return builder.build(raw);
        }
        if !self.converters.is_builtin(converter) {
            builder.warn(
                DiagnosticCode::UnknownConverter,
                converter,
                &format!("unknown converter '{converter}' for argument '{arg}', defaulting to 'string'"),
            );
        }
        self.converters.map(converter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typesync_core::{ArgumentSpec, BodySpec, EndpointMeta, HttpMethod, Severity};

    fn generator() -> Generator<'static> {
        Generator::new(GenerationConfig::default()).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GenerationConfig::builder().max_depth(0).build();
        assert!(Generator::new(config).unwrap_err().is_config_error());
    }

    #[test]
    fn test_naming_format_must_render_identifier() {
        let mut config = GenerationConfig::default();
        config.naming.args_type = "{{pc}} Args".to_string();
        let err = Generator::new(config).unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("not an identifier"));

        let mut config = GenerationConfig::default();
        config.naming.function = "{{nope}}".to_string();
        assert!(Generator::new(config).unwrap_err().is_config_error());
    }

    #[test]
    fn test_skip_reasons() {
        let generator = generator();
        let ignored = Endpoint::new("a", "/a").returning(RawType::Int).with_meta(EndpointMeta {
            ignore: true,
            ..Default::default()
        });
        let internal = Endpoint::new("b", "/b").returning(RawType::Int).with_meta(EndpointMeta {
            visibility: Visibility::Internal,
            ..Default::default()
        });
        let unannotated = Endpoint::new("c", "/c");

        let run = generator.run(&[ignored, internal, unannotated]).unwrap();
        assert!(run.emitted.is_empty());
        assert_eq!(run.diagnostics.with_code(DiagnosticCode::EndpointSkipped).count(), 3);
        assert_eq!(run.diagnostics.count(Severity::Info), 3);
        assert!(!run.diagnostics.has_fatal());
    }

    #[test]
    fn test_unannotated_return_is_any_when_not_skipped() {
        let config = GenerationConfig::builder().skip_unannotated(false).build();
        let run = Generator::new(config).unwrap().run(&[Endpoint::new("main", "/")]).unwrap();
        assert!(run.types().contains("export type MainReturnType = any;"));
    }

    #[test]
    fn test_argument_type_resolution_order() {
        let mut generator = generator();
        generator.register_converter("date", RawType::class("datetime.date", vec![]));
        let endpoint = Endpoint::new("lookup", "/<int:a>/<b>/<date:c>/<weird:d>/<e>")
            .with_argument("a", ArgumentSpec::annotated(RawType::Bool))
            .with_argument("b", ArgumentSpec::converter("float"))
            .with_argument("c", ArgumentSpec::default())
            .with_argument("d", ArgumentSpec::default())
            .with_argument("e", ArgumentSpec::default())
            .returning(RawType::Int);

        let run = generator.run(&[endpoint]).unwrap();
        assert!(run.types().contains(
            "export type LookupArgsType = { a: boolean; b: number; c: any; d: string; e: string };"
        ));
        assert_eq!(run.diagnostics.with_code(DiagnosticCode::UnknownConverter).count(), 1);
        // datetime.date is opaque without a class map
        assert_eq!(run.diagnostics.with_code(DiagnosticCode::UnsupportedType).count(), 1);
    }

    #[test]
    fn test_body_joins_args() {
        let endpoint = Endpoint::new("create", "/items/<int:id>")
            .with_methods([HttpMethod::Put, HttpMethod::Post])
            .with_argument("id", ArgumentSpec::default())
            .with_body(RawType::list(RawType::Str))
            .returning(RawType::Bool);

        let run = generator().run(&[endpoint]).unwrap();
        assert!(run.types().contains("export type CreateArgsType = { id: number; json: string[] };"));
        let post = run.requests().find("async function postCreate(").unwrap();
        let put = run.requests().find("async function putCreate(").unwrap();
        assert!(post < put);
    }

    #[test]
    fn test_body_key_collision_is_fatal() {
        let mut endpoint = Endpoint::new("create", "/items/<json>")
            .with_argument("json", ArgumentSpec::default())
            .returning(RawType::Bool);
        endpoint.body = Some(BodySpec {
            key: "json".to_string(),
            ty: RawType::Str,
        });

        let run = generator().run(&[endpoint]).unwrap();
        assert!(run.emitted.is_empty());
        assert_eq!(run.diagnostics.with_code(DiagnosticCode::AmbiguousPath).count(), 1);
    }

    #[test]
    fn test_malformed_pattern_is_fatal_for_endpoint() {
        let run = generator()
            .run(&[
                Endpoint::new("broken", "/items/<id").returning(RawType::Int),
                Endpoint::new("fine", "/fine").returning(RawType::Int),
            ])
            .unwrap();
        assert_eq!(run.emitted, vec![EndpointName::new("fine")]);
        assert!(run.diagnostics.has_fatal());
        assert_eq!(run.diagnostics.with_code(DiagnosticCode::InvalidPattern).count(), 1);
        assert_eq!(run.diagnostics.with_code(DiagnosticCode::AmbiguousPath).count(), 0);
    }

    #[test]
    fn test_duplicate_endpoint_types_are_never_built() {
        let definitions = TypeDefinitions::new().with(
            "Loop",
            typesync_core::TypeDef::Alias {
                params: vec![],
                value: RawType::list(RawType::named("Loop")),
            },
        );
        let run = generator()
            .with_definitions(definitions)
            .run(&[
                Endpoint::new("main", "/a").returning(RawType::Int),
                Endpoint::new("main", "/b").returning(RawType::named("Loop")),
            ])
            .unwrap();

        assert_eq!(run.emitted, vec![EndpointName::new("main")]);
        assert_eq!(run.diagnostics.with_code(DiagnosticCode::DuplicateName).count(), 1);
        assert!(run.aliases.is_empty());
        assert!(!run.types().contains("Loop"));
    }

    #[test]
    fn test_alias_avoids_reserved_names() {
        let definitions = TypeDefinitions::new().with(
            "LoopReturnType",
            typesync_core::TypeDef::Alias {
                params: vec![],
                value: RawType::list(RawType::named("LoopReturnType")),
            },
        );
        let generator = generator().with_definitions(definitions);
        let run = generator
            .run(&[Endpoint::new("loop", "/loop").returning(RawType::named("LoopReturnType"))])
            .unwrap();
        assert!(run.aliases.contains("LoopReturnType2"));
        assert!(run.types().contains("export type LoopReturnType2 = LoopReturnType2[];"));
        assert!(run.types().contains("export type LoopReturnType = LoopReturnType2;"));
    }

    #[test]
    fn test_output_file_names() {
        let config = GenerationConfig::builder()
            .types_module("client-types.ts")
            .requests_module("client.ts")
            .build();
        let run = Generator::new(config)
            .unwrap()
            .run(&[Endpoint::new("main", "/").returning(RawType::Int)])
            .unwrap();
        assert_eq!(run.code.file_count(), 2);
        assert!(run.code.get("client-types.ts").is_some());
        assert!(run.requests().contains("from \"./client-types\""));
    }
}

use std::collections::HashSet;

use anyhow::{Result, bail};
use log::{debug, trace};
use serde_json::Value;

use crate::utils::naming::to_pascal_case;

const GENERATOR_NAME: &str = env!("CARGO_PKG_NAME");
const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Indent unit of the generated source
const INDENT: &str = "    ";

/// A property of a generated class
#[derive(Debug, Clone, PartialEq, Eq)]
struct PropertyModel {
    /// Name of the property in the JSON document
    json_name: String,

    /// C# identifier
    name: String,

    /// C# type
    type_name: String,

    /// Inline initializer, if any
    initializer: Option<String>,

    required: bool,

    description: Option<String>,
}

/// A generated class
#[derive(Debug, Clone, PartialEq, Eq)]
struct ClassModel {
    name: String,
    description: Option<String>,
    properties: Vec<PropertyModel>,
}

/// C# type resolved for a property schema
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResolvedType {
    name: String,

    /// Initializer used when the schema has no usable default
    initializer: Option<String>,

    /// Value types become nullable when optional and uninitialized
    value_type: bool,
}

impl ResolvedType {
    fn plain(name: &str, value_type: bool) -> Self {
        Self {
            name: name.to_string(),
            initializer: None,
            value_type,
        }
    }

    fn class(name: String) -> Self {
        Self {
            initializer: Some(format!("new {}()", name)),
            name,
            value_type: false,
        }
    }
}

/// Renders C# classes from a JSON Schema document
///
/// Output has one class header per line, braces on their own lines, one
/// annotation line before every class and property, and one property per line.
///
/// Every object schema gets exactly one class. When two different schemas map
/// to the same name, the later one gets a numeric suffix (`Config2`).
#[derive(Debug)]
pub struct CSharpClassGenerator<'v> {
    /// Root schema, used to resolve `$ref`
    root: &'v Value,

    /// Namespace wrapping every class
    namespace: String,

    /// Classes in emission order
    classes: Vec<ClassModel>,

    /// Reserved class names and the schema each one belongs to
    names: Vec<(String, &'v Value)>,

    /// Class names already emitted
    emitted: HashSet<String>,
}

impl<'v> CSharpClassGenerator<'v> {
    /// Create a generator for a schema document
    pub fn new(root: &'v Value, namespace: impl Into<String>) -> Self {
        Self {
            root,
            namespace: namespace.into(),
            classes: Vec::new(),
            names: Vec::new(),
            emitted: HashSet::new(),
        }
    }

    /// Generate the source text, naming the root class `root_name`
    pub fn generate(mut self, root_name: &str) -> Result<String> {
        let root = self.root;
        if !root.is_object() {
            bail!("Schema root must be a JSON object");
        }

        // Root and definitions claim their names before any inline class
        let root_name = self.class_name_for(root_name, root);
        let mut definitions = Vec::new();
        for key in ["definitions", "$defs"] {
            if let Some(entries) = root.get(key).and_then(Value::as_object) {
                for (name, definition) in entries {
                    if is_object_schema(definition) {
                        let class_name = self.class_name_for(&to_pascal_case(name), definition);
                        definitions.push((class_name, definition));
                    } else {
                        trace!("Skipping non-object definition {}", name);
                    }
                }
            }
        }

        self.collect_class(root_name, root);
        for (name, definition) in definitions {
            self.collect_class(name, definition);
        }

        debug!("Generated {} classes from schema", self.classes.len());
        Ok(self.render())
    }

    /// Class name reserved for `schema`, if any
    fn name_of(&self, schema: &'v Value) -> Option<&str> {
        self.names
            .iter()
            .find(|(_, owner)| std::ptr::eq(*owner, schema))
            .map(|(name, _)| name.as_str())
    }

    /// Name of the class generated for `schema`, reserving `base` or the
    /// first free `base2`, `base3`, ... on first sight
    fn class_name_for(&mut self, base: &str, schema: &'v Value) -> String {
        if let Some(name) = self.name_of(schema) {
            return name.to_string();
        }

        let mut name = base.to_string();
        let mut suffix = 2;
        while self.names.iter().any(|(taken, _)| *taken == name) {
            name = format!("{}{}", base, suffix);
            suffix += 1;
        }
        if name != base {
            debug!("Class name {} is taken, using {}", base, name);
        }

        self.names.push((name.clone(), schema));
        name
    }

    fn collect_class(&mut self, name: String, schema: &'v Value) {
        if !self.emitted.insert(name.clone()) {
            trace!("Class {} already generated", name);
            return;
        }

        let required: HashSet<&str> = schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let mut pending = Vec::new();
        let mut properties = Vec::new();
        if let Some(props) = schema.get("properties").and_then(Value::as_object) {
            for (json_name, prop_schema) in props {
                let is_required = required.contains(json_name.as_str());
                properties.push(self.property(json_name, prop_schema, is_required, schema, &mut pending));
            }
        }

        trace!("Class {} has {} properties", name, properties.len());
        self.classes.push(ClassModel {
            name,
            description: description(schema),
            properties,
        });

        for (nested_name, nested_schema) in pending {
            self.collect_class(nested_name, nested_schema);
        }
    }

    fn property(
        &mut self,
        json_name: &str,
        schema: &'v Value,
        required: bool,
        owner: &'v Value,
        pending: &mut Vec<(String, &'v Value)>,
    ) -> PropertyModel {
        let name = to_pascal_case(json_name);
        let resolved = self.resolve_type(&name, schema, owner, pending);

        let initializer = schema
            .get("default")
            .and_then(default_literal)
            .or(resolved.initializer);

        let mut type_name = resolved.name;
        if resolved.value_type && !required && initializer.is_none() {
            type_name.push('?');
        }

        PropertyModel {
            json_name: json_name.to_string(),
            name,
            type_name,
            initializer,
            required,
            description: description(schema),
        }
    }

    fn resolve_type(
        &mut self,
        name: &str,
        schema: &'v Value,
        owner: &'v Value,
        pending: &mut Vec<(String, &'v Value)>,
    ) -> ResolvedType {
        if let Some(reference) = schema.get("$ref").and_then(Value::as_str) {
            return self.resolve_reference(name, reference, owner, pending);
        }

        match schema_type(schema) {
            Some("string") => ResolvedType::plain("string", false),
            Some("integer") => match schema.get("format").and_then(Value::as_str) {
                Some("int64") => ResolvedType::plain("long", true),
                _ => ResolvedType::plain("int", true),
            },
            Some("number") => ResolvedType::plain("double", true),
            Some("boolean") => ResolvedType::plain("bool", true),
            Some("array") => {
                let item = match schema.get("items") {
                    Some(items) if items.is_object() => {
                        self.resolve_type(&format!("{}Item", name), items, owner, pending).name
                    }
                    _ => "object".to_string(),
                };
                ResolvedType {
                    name: format!("System.Collections.Generic.IList<{}>", item),
                    initializer: Some(format!("new System.Collections.ObjectModel.Collection<{}>()", item)),
                    value_type: false,
                }
            }
            _ if has_properties(schema) => {
                let class_name = self.class_name_for(&to_pascal_case(name), schema);
                pending.push((class_name.clone(), schema));
                ResolvedType::class(class_name)
            }
            _ => ResolvedType::plain("object", false),
        }
    }

    fn resolve_reference(
        &mut self,
        name: &str,
        reference: &str,
        owner: &'v Value,
        pending: &mut Vec<(String, &'v Value)>,
    ) -> ResolvedType {
        let target = if reference == "#" {
            Some(self.root)
        } else {
            self.lookup_reference(reference)
        };

        let target = match target {
            // References to primitive definitions are inlined
            Some(target) if !is_object_schema(target) && target.get("$ref").is_none() => {
                return self.resolve_type(name, target, owner, pending);
            }
            Some(target) => target,
            None => {
                let class_name = to_pascal_case(reference.rsplit('/').next().unwrap_or(reference));
                if class_name.is_empty() {
                    debug!("Unresolved reference {}, using object", reference);
                    return ResolvedType::plain("object", false);
                }
                return ResolvedType::class(class_name);
            }
        };

        let known = self.name_of(target).is_some();
        let base = to_pascal_case(reference.rsplit('/').next().unwrap_or(reference));
        let class_name = self.class_name_for(&base, target);
        if !known && is_object_schema(target) {
            pending.push((class_name.clone(), target));
        }

        // Self-typed members stay uninitialized
        if std::ptr::eq(target, owner) {
            ResolvedType::plain(&class_name, false)
        } else {
            ResolvedType::class(class_name)
        }
    }

    /// Find a local `#/<section>/<name>` target, e.g. `#/definitions/Tree`
    fn lookup_reference(&self, reference: &str) -> Option<&'v Value> {
        let path = reference.strip_prefix("#/")?;
        let (section, name) = path.split_once('/')?;
        self.root.get(section)?.get(name)
    }

    fn render(&self) -> String {
        let mut lines = vec![
            "//----------------------".to_string(),
            "// <auto-generated>".to_string(),
            format!("//     Generated using {} v{}", GENERATOR_NAME, GENERATOR_VERSION),
            "// </auto-generated>".to_string(),
            "//----------------------".to_string(),
            String::new(),
            format!("namespace {}", self.namespace),
            "{".to_string(),
            format!("{INDENT}#pragma warning disable // Disable all warnings"),
        ];

        for class in &self.classes {
            lines.push(String::new());
            push_summary(&mut lines, INDENT, class.description.as_deref());
            lines.push(format!(
                "{INDENT}[System.CodeDom.Compiler.GeneratedCode(\"{}\", \"{}\")]",
                GENERATOR_NAME, GENERATOR_VERSION
            ));
            lines.push(format!("{INDENT}public partial class {}", class.name));
            lines.push(format!("{INDENT}{{"));

            for (idx, property) in class.properties.iter().enumerate() {
                if idx > 0 {
                    lines.push(String::new());
                }
                render_property(&mut lines, property);
            }

            lines.push(format!("{INDENT}}}"));
        }

        lines.push("}".to_string());
        lines.push(String::new());
        lines.join("\n")
    }
}

fn render_property(lines: &mut Vec<String>, property: &PropertyModel) {
    let indent = INDENT.repeat(2);
    push_summary(lines, &indent, property.description.as_deref());

    let handling = if property.required {
        "Required = Newtonsoft.Json.Required.Always".to_string()
    } else {
        "Required = Newtonsoft.Json.Required.DisallowNull, \
         NullValueHandling = Newtonsoft.Json.NullValueHandling.Ignore"
            .to_string()
    };
    lines.push(format!(
        "{indent}[Newtonsoft.Json.JsonProperty(\"{}\", {})]",
        escape_string(&property.json_name),
        handling
    ));

    let declaration = format!(
        "{indent}public {} {} {{ get; set; }}",
        property.type_name, property.name
    );
    match &property.initializer {
        Some(initializer) => lines.push(format!("{} = {};", declaration, initializer)),
        None => lines.push(declaration),
    }
}

fn push_summary(lines: &mut Vec<String>, indent: &str, description: Option<&str>) {
    if let Some(description) = description {
        lines.push(format!("{indent}/// <summary>"));
        for line in description.lines() {
            lines.push(format!("{indent}/// {}", line.trim_end()));
        }
        lines.push(format!("{indent}/// </summary>"));
    }
}

/// First non-null entry of `type`
fn schema_type(schema: &Value) -> Option<&str> {
    match schema.get("type")? {
        Value::String(ty) => Some(ty.as_str()),
        Value::Array(types) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|ty| *ty != "null"),
        _ => None,
    }
}

fn has_properties(schema: &Value) -> bool {
    schema.get("properties").is_some_and(Value::is_object)
}

fn is_object_schema(schema: &Value) -> bool {
    has_properties(schema) || schema_type(schema) == Some("object")
}

fn description(schema: &Value) -> Option<String> {
    schema
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// C# literal for a schema default; arrays, objects and null have none
fn default_literal(default: &Value) -> Option<String> {
    match default {
        Value::String(s) => Some(format!("\"{}\"", escape_string(s))),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

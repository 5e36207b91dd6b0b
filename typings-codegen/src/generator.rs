//! Declaration file generator.

use crate::error::CodegenError;
use crate::typescript::DeclarationAssembler;
use typings_schema::ApiSpec;

/// Default output file name.
pub const DEFAULT_FILENAME: &str = "typings.d.ts";

/// Default tool name written in the header comment.
pub const DEFAULT_TOOL: &str = "goctl";

/// Generation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Tool name in the header comment.
    pub tool: String,
    /// Version in the header comment, overriding the description's
    /// `info.version`.
    pub version: Option<String>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            tool: DEFAULT_TOOL.to_string(),
            version: None,
        }
    }
}

impl GeneratorOptions {
    /// Sets the tool name.
    #[must_use]
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }

    /// Sets the version written in the header comment.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

/// Main declaration generator.
pub struct Generator<'a> {
    spec: &'a ApiSpec,
    options: &'a GeneratorOptions,
}

impl<'a> Generator<'a> {
    /// Creates a new generator for the given description.
    #[must_use]
    pub fn new(spec: &'a ApiSpec, options: &'a GeneratorOptions) -> Self {
        Self { spec, options }
    }

    /// Returns the version written in the header comment.
    #[must_use]
    pub fn version(&self) -> &str {
        self.options
            .version
            .as_deref()
            .or_else(|| self.spec.version())
            .unwrap_or_default()
    }

    /// Generates the complete declaration file.
    ///
    /// # Errors
    /// Returns `CodegenError` if any composite fails to render.
    pub fn generate(&self) -> Result<String, CodegenError> {
        let body = DeclarationAssembler::new(self.spec)
            .with_base_indent(1)
            .assemble()?;

        let mut output = String::with_capacity(body.len() + 128);
        self.generate_header(&mut output);
        output.push_str("declare namespace API {\n");
        output.push_str(&body);
        output.push_str("\n}\n\n");
        output.push_str("export { API };\n");
        Ok(output)
    }

    fn generate_header(&self, output: &mut String) {
        output.push_str(&format!(
            "// Code generated by {}. DO NOT EDIT.\n",
            self.options.tool
        ));
        output.push_str(&format!("// {} {}\n\n", self.options.tool, self.version()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typings_schema::{DefineStruct, Member, PrimitiveKind, Type};

    fn user_spec() -> ApiSpec {
        let mut spec: ApiSpec = [DefineStruct::new("User")
            .with_member(Member::new("Id", Type::Primitive(PrimitiveKind::Int64)))]
        .into_iter()
        .collect();
        spec.info.push(("version".to_string(), "1.2.0".to_string()));
        spec
    }

    #[test]
    fn test_generate_wraps_namespace() {
        let spec = user_spec();
        let options = GeneratorOptions::default();
        let out = Generator::new(&spec, &options).generate().expect("generate");
        assert_eq!(
            out,
            "// Code generated by goctl. DO NOT EDIT.\n\
             // goctl 1.2.0\n\n\
             declare namespace API {\n\
             \texport interface User {\n\
             \t\tId?: string\n\
             \t}\n\
             }\n\n\
             export { API };\n"
        );
    }

    #[test]
    fn test_version_override_and_tool() {
        let spec = user_spec();
        let options = GeneratorOptions::default()
            .with_tool("apigen")
            .with_version("v9");
        let out = Generator::new(&spec, &options).generate().expect("generate");
        assert!(out.starts_with("// Code generated by apigen. DO NOT EDIT.\n// apigen v9\n"));
    }

    #[test]
    fn test_bare_info_version_in_header() {
        let spec = typings_schema::parse_api("info (\n    version: 1.0.3\n)\ntype A {\n}\n")
            .expect("parse");
        let options = GeneratorOptions::default();
        let out = Generator::new(&spec, &options).generate().expect("generate");
        assert!(out.starts_with("// Code generated by goctl. DO NOT EDIT.\n// goctl 1.0.3\n"));
    }

    #[test]
    fn test_missing_version_is_empty() {
        let spec = ApiSpec::new();
        let options = GeneratorOptions::default();
        assert_eq!(Generator::new(&spec, &options).version(), "");
    }

    #[test]
    fn test_generate_is_deterministic() {
        let spec = user_spec();
        let options = GeneratorOptions::default();
        let generator = Generator::new(&spec, &options);
        assert_eq!(
            generator.generate().expect("first"),
            generator.generate().expect("second")
        );
    }
}

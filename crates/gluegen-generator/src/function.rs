//! The function orchestrator.
//!
//! [`FunctionGenerator`] turns a [`FunctionSpec`] into the C source of one
//! wrapper function. The body is produced in a fixed order:
//!
//! ```text
//! static PyObject *<prefix>_<name>(<self type> *_self, PyObject *_args)
//! {
//!     PyObject *_res = NULL;
//!     declarations            every variable except the method's self
//!     guard                   optional CallGuard
//!     parse pre-checks
//!     PyArg_ParseTuple        In and InOut variables
//!     parse post-checks
//!     native call             arguments in parameter order
//!     error checks            Error-role return values; other returned
//!                             values get an unchecked marker
//!     Py_BuildValue           return value plus Out and InOut variables
//!     cleanup                 declaration order
//!     return _res;
//! }
//! ```
//!
//! Each function is rendered into its own [`SourceWriter`]; a contract
//! violation aborts that function only and leaves no partial text behind.

use gluegen_core::{DeclModifiers, GenError, GenResult, SourceWriter, emit_unchecked_marker};
use gluegen_registry::DescriptorRef;
use tracing::{debug, trace};
use xxhash_rust::xxh64::xxh64;

use crate::config::GeneratorConfig;
use crate::strategy::{CallGuard, OrdinaryReturn, ReturnStrategy};
use crate::variable::{Mode, ParamFlags, Parameter, Role, Variable};

/// Expression a method's self argument is passed as.
pub const SELF_EXPR: &str = "_self->ob_itself";

const PARSE_PREFIX: &str = "if (!PyArg_ParseTuple(";
const BUILD_CALL: &str = "Py_BuildValue(";

/// Whether a wrapper is a plain function or a method on a wrapped object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FunctionKind {
    #[default]
    Function,
    /// The first parameter is the wrapped object itself.
    Method,
}

/// Everything needed to generate one wrapper.
#[derive(Debug, Clone, Default)]
pub struct FunctionSpec {
    /// Name exposed to scripts, also the native symbol unless overridden.
    pub name: String,
    pub kind: FunctionKind,
    /// Native return type, `None` for `void`.
    pub returns: Option<DescriptorRef>,
    pub return_flags: ParamFlags,
    pub params: Vec<Parameter>,
    /// Preprocessor condition the wrapper is compiled under.
    pub condition: Option<String>,
    /// Native symbol, when it differs from `name`.
    pub call_name: Option<String>,
}

impl FunctionSpec {
    /// A plain function.
    pub fn function(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// A method; the first parameter added is the self object.
    pub fn method(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FunctionKind::Method,
            ..Self::default()
        }
    }

    pub fn returns(mut self, descriptor: DescriptorRef) -> Self {
        self.returns = Some(descriptor);
        self
    }

    /// The native function returns a C++ reference.
    pub fn returns_reference(mut self) -> Self {
        self.return_flags |= ParamFlags::REFERENCE;
        self
    }

    pub fn param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    /// Wrap the generated function in `#if condition`.
    pub fn condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// Call `call_name` instead of `name`.
    pub fn call_name(mut self, call_name: impl Into<String>) -> Self {
        self.call_name = Some(call_name.into());
        self
    }

    /// The native symbol that is called.
    pub fn native_name(&self) -> &str {
        self.call_name.as_deref().unwrap_or(&self.name)
    }
}

/// The output for one function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFunction {
    /// Name exposed to scripts.
    pub name: String,
    /// Name of the generated C function.
    pub c_name: String,
    /// `"(int x) -> (int _rv)"`
    pub docstring: String,
    pub condition: Option<String>,
    /// The complete C source, condition included.
    pub source: String,
    /// xxh64 of `source`.
    pub fingerprint: u64,
}

impl GeneratedFunction {
    /// The method-table entry registering this function.
    pub fn method_entry(&self) -> String {
        let entry = format!(
            "{{\"{}\", (PyCFunction){}, 1,\n PyDoc_STR(\"{}\")}},",
            self.name, self.c_name, self.docstring
        );
        match &self.condition {
            Some(condition) => format!("\n#if {condition}\n{entry}\n#endif\n"),
            None => entry,
        }
    }
}

/// Generates wrapper functions.
///
/// ```
/// use std::sync::Arc;
/// use gluegen_core::Type;
/// use gluegen_generator::{FunctionGenerator, FunctionSpec, GeneratorConfig, Parameter};
///
/// let int = Arc::new(Type::new("int", "i"));
/// let spec = FunctionSpec::function("abs")
///     .returns(int.clone())
///     .param(Parameter::input(int, "x"));
///
/// let generated = FunctionGenerator::new(GeneratorConfig::with_prefix("M"))
///     .generate(&spec)
///     .unwrap();
/// assert!(generated.source.contains("_rv = abs(x);"));
/// assert_eq!(generated.docstring, "(int x) -> (int _rv)");
/// ```
#[derive(Debug)]
pub struct FunctionGenerator {
    config: GeneratorConfig,
    returns: Box<dyn ReturnStrategy>,
    pub(crate) guard: Option<Box<dyn CallGuard>>,
}

impl Default for FunctionGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl FunctionGenerator {
    /// A generator with [`OrdinaryReturn`] and no guard.
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            returns: Box::new(OrdinaryReturn),
            guard: None,
        }
    }

    pub fn with_return_strategy(mut self, strategy: impl ReturnStrategy + 'static) -> Self {
        self.returns = Box::new(strategy);
        self
    }

    pub fn with_guard(mut self, guard: impl CallGuard + 'static) -> Self {
        self.guard = Some(Box::new(guard));
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate one wrapper function.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn generate(&self, spec: &FunctionSpec) -> GenResult<GeneratedFunction> {
        let vars = self.variables(spec)?;
        let c_name = self.config.c_name(&spec.name);

        let mut out = SourceWriter::with_indent(self.config.indent.as_str());
        if let Some(condition) = &spec.condition {
            out.blank();
            out.line(format!("#if {condition}"));
        }
        out.blank();
        out.line(self.header(spec, &c_name));
        out.open_brace();
        out.line(format!("PyObject *{} = NULL;", self.config.result_name));

        self.emit_body(spec, &vars, &mut out)?;

        out.line(format!("return {};", self.config.result_name));
        out.close_brace();
        if spec.condition.is_some() {
            out.line("#endif");
        }

        let source = out.finish();
        let fingerprint = xxh64(source.as_bytes(), 0);
        debug!(
            function = %spec.name,
            bytes = source.len(),
            fingerprint,
            "generated function"
        );

        Ok(GeneratedFunction {
            name: spec.name.clone(),
            c_name,
            docstring: docstring(&vars),
            condition: spec.condition.clone(),
            source,
            fingerprint,
        })
    }

    /// The docstring a function would get, without generating it.
    pub fn docstring(&self, spec: &FunctionSpec) -> GenResult<String> {
        Ok(docstring(&self.variables(spec)?))
    }

    fn header(&self, spec: &FunctionSpec, c_name: &str) -> String {
        let self_type = match spec.kind {
            FunctionKind::Function => "PyObject",
            FunctionKind::Method => self.config.object_type.as_str(),
        };
        format!(
            "static PyObject *{c_name}({self_type} *_self, PyObject *{})",
            self.config.args_name
        )
    }

    /// Return value first, then the parameters in order.
    fn variables(&self, spec: &FunctionSpec) -> GenResult<Vec<Variable>> {
        let mut vars = Vec::with_capacity(spec.params.len() + 1);
        if let Some(descriptor) = &spec.returns {
            let var = self.returns.return_variable(descriptor.clone());
            vars.push(var.with_flags(spec.return_flags));
        }

        if spec.kind == FunctionKind::Method && spec.params.is_empty() {
            return Err(GenError::MissingSelf {
                function: spec.name.clone(),
            });
        }

        for (index, param) in spec.params.iter().enumerate() {
            if spec.kind == FunctionKind::Method && index == 0 {
                if param.mode != Mode::In {
                    return Err(GenError::SelfNotInput {
                        function: spec.name.clone(),
                    });
                }
                vars.push(
                    Variable::new(param.descriptor.clone(), SELF_EXPR, Mode::In, Role::SelfArg)
                        .with_flags(param.flags),
                );
                continue;
            }
            let name = match &param.name {
                Some(name) => name.clone(),
                None => format!("_arg{}", index + 1),
            };
            vars.push(
                Variable::new(param.descriptor.clone(), name, param.mode, Role::Argument)
                    .with_flags(param.flags),
            );
        }

        for var in vars.iter().filter(|v| v.mode.is_returned()) {
            var.descriptor.check_output_use(var.mode.is_parsed())?;
        }
        Ok(vars)
    }

    fn emit_body(
        &self,
        spec: &FunctionSpec,
        vars: &[Variable],
        out: &mut SourceWriter,
    ) -> GenResult<()> {
        let function = spec.name.as_str();

        trace!(function, phase = "declare");
        for var in vars.iter().filter(|v| v.role != Role::SelfArg) {
            let mut modifiers = DeclModifiers::empty();
            if var.is_return() && var.is_reference() {
                modifiers |= DeclModifiers::REFERENCE;
            }
            if var.flags.contains(ParamFlags::CONST) {
                modifiers |= DeclModifiers::CONST;
            }
            var.descriptor.declare_with(&var.name, modifiers, out)?;
        }

        if let Some(guard) = &self.guard {
            trace!(function, phase = "guard");
            guard.emit(spec.native_name(), out);
        }

        trace!(function, phase = "parse");
        self.emit_parse(vars, out);

        trace!(function, phase = "call");
        self.emit_call(spec, vars, out)?;

        trace!(function, phase = "check");
        for var in vars {
            if var.role == Role::Error {
                var.descriptor.check_error(&var.name, out);
            } else if var.is_built() && self.config.annotate_unchecked {
                emit_unchecked_marker(var.descriptor.type_name(), &var.name, out);
            }
        }

        trace!(function, phase = "build");
        self.emit_build(vars, out);

        trace!(function, phase = "cleanup");
        for var in vars.iter().filter(|v| v.role != Role::SelfArg) {
            var.descriptor.cleanup(&var.name, out);
        }
        Ok(())
    }

    fn emit_parse(&self, vars: &[Variable], out: &mut SourceWriter) {
        let parsed: Vec<&Variable> = vars.iter().filter(|v| v.is_parsed()).collect();

        for var in &parsed {
            var.descriptor.parse_pre_check(&var.name, out);
        }

        let mut format = String::new();
        let mut args = Vec::new();
        for var in &parsed {
            format.push_str(var.descriptor.parse_format());
            if let Some(arg) = var.descriptor.parse_args(&var.name) {
                args.push(arg);
            }
        }
        out.line(format!(
            "{PARSE_PREFIX}{}, \"{format}\"{}))",
            self.config.args_name,
            trailing_args(&args, PARSE_PREFIX.len())
        ));
        out.indent();
        out.line("return NULL;");
        out.dedent();

        for var in &parsed {
            var.descriptor.parse_post_check(&var.name, out);
        }
    }

    fn emit_call(
        &self,
        spec: &FunctionSpec,
        vars: &[Variable],
        out: &mut SourceWriter,
    ) -> GenResult<()> {
        let mut args = Vec::new();
        for var in vars.iter().filter(|v| !v.is_return()) {
            let descriptor = &var.descriptor;
            let arg = match var.mode {
                Mode::In => descriptor.pass_input(&var.name)?,
                Mode::Out | Mode::InOut if var.is_reference() => {
                    descriptor.pass_by_reference(&var.name)?
                }
                Mode::Out | Mode::InOut => descriptor.pass_output(&var.name)?,
            };
            args.push(arg);
        }

        let head = match vars.iter().find(|v| v.is_return()) {
            Some(rv) => format!("{} = {}(", rv.name, spec.native_name()),
            None => format!("{}(", spec.native_name()),
        };
        let separator = format!(",\n{}", " ".repeat(head.len()));
        out.line(format!("{head}{});", args.join(&separator)));
        Ok(())
    }

    fn emit_build(&self, vars: &[Variable], out: &mut SourceWriter) {
        let mut format = String::new();
        let mut args = Vec::new();
        for var in vars.iter().filter(|v| v.is_built()) {
            var.descriptor.build_pre_check(&var.name, out);
            format.push_str(var.descriptor.build_format());
            args.push(var.descriptor.build_args(&var.name));
        }

        let result = &self.config.result_name;
        if format.is_empty() {
            out.line("Py_INCREF(Py_None);");
            out.line(format!("{result} = Py_None;"));
            return;
        }
        let head = format!("{result} = {BUILD_CALL}");
        out.line(format!(
            "{head}\"{format}\"{});",
            trailing_args(&args, head.len())
        ));
    }
}

/// Each argument preceded by a comma and a line break aligned under the
/// opening parenthesis.
fn trailing_args(args: &[String], column: usize) -> String {
    let separator = format!(",\n{}", " ".repeat(column));
    args.iter().map(|arg| format!("{separator}{arg}")).collect()
}

fn docstring(vars: &[Variable]) -> String {
    let mut inputs = Vec::new();
    let mut outputs = Vec::new();
    for var in vars.iter().filter(|v| v.is_documented()) {
        let item = format!("{} {}", var.descriptor.type_name(), var.name);
        if var.mode.is_parsed() {
            inputs.push(item.clone());
        }
        if var.mode.is_returned() {
            outputs.push(item);
        }
    }
    let input = format!("({})", inputs.join(", "));
    let output = if outputs.is_empty() {
        "None".to_string()
    } else {
        format!("({})", outputs.join(", "))
    };
    format!("{input} -> {output}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{ErrorCodeReturn, WeakLinkGuard};
    use gluegen_core::buffer::{BufferElement, FixedBuffer, HeapBuffer, HeapKind};
    use gluegen_core::{ErrorCodeType, OpaqueType, Restricted, SyntheticType, Type};
    use std::sync::Arc;
    use tracing_test::traced_test;

    fn int() -> DescriptorRef {
        Arc::new(Type::new("int", "i"))
    }

    fn pad(n: usize) -> String {
        " ".repeat(n)
    }

    #[test]
    fn two_argument_function() {
        let spec = FunctionSpec::function("Add")
            .returns(int())
            .param(Parameter::input(int(), "a"))
            .param(Parameter::input(int(), "b"));
        let generated = FunctionGenerator::new(GeneratorConfig::with_prefix("Py"))
            .generate(&spec)
            .unwrap();

        let expected = [
            "".to_string(),
            "static PyObject *Py_Add(PyObject *_self, PyObject *_args)".to_string(),
            "{".to_string(),
            "\tPyObject *_res = NULL;".to_string(),
            "\tint _rv;".to_string(),
            "\tint a;".to_string(),
            "\tint b;".to_string(),
            "\tif (!PyArg_ParseTuple(_args, \"ii\",".to_string(),
            format!("\t{}&a,", pad(22)),
            format!("\t{}&b))", pad(22)),
            "\t\treturn NULL;".to_string(),
            "\t_rv = Add(a,".to_string(),
            format!("\t{}b);", pad(10)),
            "\t/* unchecked: no error check for int _rv */".to_string(),
            "\t_res = Py_BuildValue(\"i\",".to_string(),
            format!("\t{}_rv);", pad(21)),
            "\treturn _res;".to_string(),
            "}".to_string(),
            "".to_string(),
        ]
        .join("\n");
        assert_eq!(generated.source, expected);
        assert_eq!(generated.c_name, "Py_Add");
        assert_eq!(generated.docstring, "(int a, int b) -> (int _rv)");
    }

    #[test]
    fn void_function_without_arguments_returns_none() {
        let spec = FunctionSpec::function("Beep");
        let generated = FunctionGenerator::default().generate(&spec).unwrap();
        assert!(generated.source.contains("\tif (!PyArg_ParseTuple(_args, \"\"))\n"));
        assert!(generated.source.contains("\tBeep();\n"));
        assert!(generated.source.contains("\tPy_INCREF(Py_None);\n\t_res = Py_None;\n"));
        assert_eq!(generated.docstring, "() -> None");
    }

    #[test]
    fn method_passes_self_without_parsing() {
        let handle: DescriptorRef = Arc::new(OpaqueType::aliased("Handle", "ResObj").by_value());
        let spec = FunctionSpec::method("ReleaseResource")
            .param(Parameter::input(handle, "_self"));
        let generator =
            FunctionGenerator::new(GeneratorConfig::with_prefix("ResObj").object_type("ResourceObject"));
        let generated = generator.generate(&spec).unwrap();

        assert!(generated.source.contains(
            "static PyObject *ResObj_ReleaseResource(ResourceObject *_self, PyObject *_args)"
        ));
        assert!(generated.source.contains("\tReleaseResource(_self->ob_itself);\n"));
        assert!(!generated.source.contains("Handle _self"));
        assert!(generated.source.contains("PyArg_ParseTuple(_args, \"\"))"));
        assert_eq!(generated.docstring, "() -> None");
    }

    #[test]
    fn method_self_must_be_input() {
        let spec = FunctionSpec::method("Touch").param(Parameter::output(int(), "self"));
        let err = FunctionGenerator::default().generate(&spec).unwrap_err();
        assert_eq!(err, GenError::SelfNotInput { function: "Touch".into() });

        let err = FunctionGenerator::default()
            .generate(&FunctionSpec::method("Touch"))
            .unwrap_err();
        assert_eq!(err, GenError::MissingSelf { function: "Touch".into() });
    }

    #[test]
    fn unnamed_parameters_are_numbered() {
        let spec = FunctionSpec::function("Pair")
            .param(Parameter::new(int(), None, Mode::In))
            .param(Parameter::new(int(), None, Mode::Out));
        let generated = FunctionGenerator::default().generate(&spec).unwrap();
        assert!(generated.source.contains("\tint _arg1;\n\tint _arg2;\n"));
        assert_eq!(generated.docstring, "(int _arg1) -> (int _arg2)");
    }

    #[test]
    fn out_and_in_out_parameters() {
        let spec = FunctionSpec::function("Swap")
            .param(Parameter::in_out(int(), "a"))
            .param(Parameter::output(int(), "b"));
        let generated = FunctionGenerator::default().generate(&spec).unwrap();
        assert!(generated.source.contains("PyArg_ParseTuple(_args, \"i\","));
        assert!(generated.source.contains(&format!("Swap(&a,\n\t{}&b);", pad(5))));
        assert!(generated.source.contains("_res = Py_BuildValue(\"ii\","));
        assert_eq!(generated.docstring, "(int a) -> (int a, int b)");
    }

    #[test]
    fn by_reference_and_const_parameters() {
        let spec = FunctionSpec::function("Scale")
            .param(Parameter::input(int(), "factor").constant())
            .param(Parameter::in_out(int(), "value").by_reference());
        let generated = FunctionGenerator::default().generate(&spec).unwrap();
        assert!(generated.source.contains("\tconst int factor;\n"));
        assert!(generated.source.contains("\tint value;\n"));
        assert!(generated.source.contains(&format!("Scale(factor,\n\t{}value);", pad(6))));
    }

    #[test]
    fn reference_return_is_declared_as_reference() {
        let spec = FunctionSpec::function("Current").returns(int()).returns_reference();
        let generated = FunctionGenerator::default().generate(&spec).unwrap();
        assert!(generated.source.contains("\tint& _rv;\n"));
    }

    #[test]
    fn synthetic_argument_is_only_passed() {
        let null: DescriptorRef = Arc::new(SyntheticType::new("(void *)0"));
        let spec = FunctionSpec::function("Open")
            .param(Parameter::input(int(), "mode"))
            .param(Parameter::input(null, "storage"));
        let generated = FunctionGenerator::default().generate(&spec).unwrap();
        assert!(generated.source.contains(&format!("Open(mode,\n\t{}(void *)0);", pad(5))));
        assert!(!generated.source.contains("storage"));
        assert_eq!(generated.docstring, "(int mode) -> None");
    }

    #[test]
    fn direction_violation_aborts_the_function() {
        let name: DescriptorRef = Arc::new(Restricted::input_only(Type::new("char*", "s")));
        let spec = FunctionSpec::function("GetName").param(Parameter::output(name, "name"));
        let err = FunctionGenerator::default().generate(&spec).unwrap_err();
        assert_eq!(err.type_name(), Some("char*"));
    }

    #[test]
    fn error_code_return_is_checked_not_built() {
        let oserr: DescriptorRef = Arc::new(ErrorCodeType::new("OSErr", "h"));
        let spec = FunctionSpec::function("FlushVol").returns(oserr);
        let generated = FunctionGenerator::default()
            .with_return_strategy(ErrorCodeReturn)
            .generate(&spec)
            .unwrap();
        assert!(generated.source.contains("\tOSErr _err;\n"));
        assert!(generated.source.contains(
            "\t_err = FlushVol();\n\tif (_err != noErr) return PyMac_Error(_err);\n"
        ));
        assert!(generated.source.contains("\tPy_INCREF(Py_None);\n"));
        assert_eq!(generated.docstring, "() -> None");
    }

    #[test]
    fn unchecked_values_are_marked_by_default() {
        let spec = FunctionSpec::function("Count").returns(int());
        let marked = FunctionGenerator::default().generate(&spec).unwrap();
        assert!(marked.source.contains(
            "\t_rv = Count();\n\t/* unchecked: no error check for int _rv */\n\t_res = Py_BuildValue("
        ));

        let quiet = FunctionGenerator::new(GeneratorConfig::default().annotate_unchecked(false))
            .generate(&spec)
            .unwrap();
        assert!(!quiet.source.contains("unchecked"));
    }

    #[test]
    fn returned_parameters_are_marked() {
        let spec = FunctionSpec::function("Swap")
            .param(Parameter::input(int(), "n"))
            .param(Parameter::in_out(int(), "a"))
            .param(Parameter::output(int(), "b"));
        let source = FunctionGenerator::default().generate(&spec).unwrap().source;
        assert!(source.contains(
            "\t/* unchecked: no error check for int a */\n\t/* unchecked: no error check for int b */\n"
        ));
        assert!(!source.contains("check for int n"));
    }

    #[test]
    fn error_code_is_checked_and_other_outputs_marked() {
        let oserr: DescriptorRef = Arc::new(ErrorCodeType::new("OSErr", "h"));
        let spec = FunctionSpec::function("GetVol")
            .returns(oserr)
            .param(Parameter::output(int(), "vRefNum"));
        let source = FunctionGenerator::default()
            .with_return_strategy(ErrorCodeReturn)
            .generate(&spec)
            .unwrap()
            .source;
        assert!(source.contains(
            "\tif (_err != noErr) return PyMac_Error(_err);\n\t/* unchecked: no error check for int vRefNum */\n"
        ));
        assert!(!source.contains("check for OSErr"));
    }

    #[test]
    fn sized_output_buffer_must_be_in_out() {
        let buffer: DescriptorRef =
            Arc::new(HeapBuffer::new(BufferElement::chars(), HeapKind::Output));
        let spec =
            FunctionSpec::function("ReadBytes").param(Parameter::output(buffer.clone(), "buf"));
        let err = FunctionGenerator::default().generate(&spec).unwrap_err();
        assert_eq!(
            err,
            GenError::ModeViolation {
                type_name: "Buffer".into(),
                used: "an output",
                required: "in-out",
            }
        );

        let spec = FunctionSpec::function("ReadBytes").param(Parameter::in_out(buffer, "buf"));
        let source = FunctionGenerator::default().generate(&spec).unwrap().source;
        assert!(source.contains("malloc(buf__in_len__)"));
    }

    #[test]
    fn unparsed_output_buffer_must_be_output_only() {
        let buffer: DescriptorRef = Arc::new(FixedBuffer::output(16, BufferElement::chars()));
        let spec = FunctionSpec::function("GetKey").param(Parameter::in_out(buffer.clone(), "o"));
        let err = FunctionGenerator::default().generate(&spec).unwrap_err();
        assert!(matches!(err, GenError::ModeViolation { required: "output-only", .. }));

        let spec = FunctionSpec::function("GetKey").param(Parameter::output(buffer, "o"));
        let source = FunctionGenerator::default().generate(&spec).unwrap().source;
        assert!(source.contains("\tif (!PyArg_ParseTuple(_args, \"\"))\n"));
        assert!(source.contains("\tGetKey(o__out__);\n"));
        assert!(!source.contains("o__in__"));
    }

    #[test]
    fn buffer_return_value_is_checked_too() {
        let buffer: DescriptorRef =
            Arc::new(HeapBuffer::new(BufferElement::chars(), HeapKind::VarOutput));
        let spec = FunctionSpec::function("Produce").returns(buffer);
        assert!(matches!(
            FunctionGenerator::default().generate(&spec),
            Err(GenError::ModeViolation { .. })
        ));
    }

    #[test]
    fn weak_link_guard_precedes_parsing() {
        let spec = FunctionSpec::function("DisposeMenuBar").call_name("DisposeMenuBarImpl");
        let generated = FunctionGenerator::default()
            .with_guard(WeakLinkGuard)
            .generate(&spec)
            .unwrap();
        let guard = generated.source.find("PyMac_PRECHECK(DisposeMenuBarImpl);").unwrap();
        let parse = generated.source.find("PyArg_ParseTuple").unwrap();
        assert!(guard < parse);
        assert!(generated.source.contains("\tDisposeMenuBarImpl();\n"));
        assert_eq!(generated.c_name, "Py_DisposeMenuBar");
    }

    #[test]
    fn condition_wraps_source_and_entry() {
        let spec = FunctionSpec::function("Gestalt").condition("TARGET_API_MAC_CARBON");
        let generated = FunctionGenerator::default().generate(&spec).unwrap();
        assert!(generated.source.starts_with("\n#if TARGET_API_MAC_CARBON\n\nstatic PyObject"));
        assert!(generated.source.ends_with("}\n#endif\n"));
        assert_eq!(
            generated.method_entry(),
            "\n#if TARGET_API_MAC_CARBON\n{\"Gestalt\", (PyCFunction)Py_Gestalt, 1,\n PyDoc_STR(\"() -> None\")},\n#endif\n"
        );
    }

    #[test]
    fn fingerprint_matches_source() {
        let spec = FunctionSpec::function("Count").returns(int());
        let generator = FunctionGenerator::default();
        let first = generator.generate(&spec).unwrap();
        let second = generator.generate(&spec).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.fingerprint, xxh64(first.source.as_bytes(), 0));
    }

    #[test]
    fn docstring_without_generating() {
        let spec = FunctionSpec::function("Abs")
            .returns(int())
            .param(Parameter::input(int(), "x"));
        let doc = FunctionGenerator::default().docstring(&spec).unwrap();
        assert_eq!(doc, "(int x) -> (int _rv)");
    }

    #[test]
    #[traced_test]
    fn generation_is_logged() {
        let spec = FunctionSpec::function("Logged");
        FunctionGenerator::default().generate(&spec).unwrap();
        assert!(logs_contain("generated function"));
        assert!(logs_contain("Logged"));
    }

    #[test]
    fn descriptors_are_shared_not_copied() {
        let shared = int();
        let spec = FunctionSpec::function("Twice")
            .param(Parameter::input(shared.clone(), "a"))
            .param(Parameter::input(shared.clone(), "b"));
        FunctionGenerator::default().generate(&spec).unwrap();
        assert_eq!(Arc::strong_count(&shared), 3);
        assert_eq!(shared.type_name(), "int");
    }
}

//! Help report: an identification record drawn as a box
//!
//! ```text
//! +=============================== HELP ===============================+
//! | object
//! | type: object
//! +--------------------------------------------------------------------+
//! | .first: string;  // "Garin"
//! | .last: string;  // "Wally"
//! +====================================================================+
//! ```

use std::io::{self, Write};

use ident_core::names::UNKNOWN;
use ident_core::{ChildRecord, IdentificationRecord, Identifier, TypeTag, Value};
use termcolor::WriteColor;

use crate::output::{write_styled, Style};

const TOP: &str = "+=============================== HELP ===============================+";
const RULE: &str = "+--------------------------------------------------------------------+";
const BOTTOM: &str = "+====================================================================+";

/// Indentation per nesting level of expanded children
const INDENT: &str = "  ";

/// Report settings
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Leave out members every foreign base object has
    pub hide_common: bool,
}

/// Renders identification records
pub struct HelpReport<'a> {
    identifier: &'a Identifier,
    options: ReportOptions,
}

impl<'a> HelpReport<'a> {
    /// Create a report renderer using the engine's configuration
    pub fn new(identifier: &'a Identifier, options: ReportOptions) -> Self {
        Self { identifier, options }
    }

    /// Name shown in the report header.
    ///
    /// A wrapper result names the class of its `output` member, or
    /// `unknown` when the output is null.
    pub fn title(&self, value: &Value, record: &IdentificationRecord) -> String {
        let config = self.identifier.config();
        let is_wrapper = config.wrapper_results.iter().any(|w| *w == record.name);
        let foreign = match value {
            Value::Foreign(obj) if is_wrapper && record.type_tag.is_foreign_object() => obj,
            _ => return record.name.clone(),
        };

        match foreign.member("output") {
            Some(Value::Null) => format!("{}<{}>", record.name, UNKNOWN),
            Some(Value::Foreign(output)) => match &output.class_name {
                Some(class) => format!("{}<{}>", record.name, self.identifier.cleaner().clean(class)),
                None => record.name.clone(),
            },
            _ => record.name.clone(),
        }
    }

    /// The `value:` line for boxed foreign scalars
    fn value_line(&self, value: &Value, record: &IdentificationRecord) -> Option<String> {
        let native = self.identifier.config().type_map.get(&record.name)?;
        let text = value.to_js_string();
        match native.as_str() {
            "string" => Some(format!("value: '{}'", text)),
            "number" => Some(format!("value: {}", text)),
            _ => None,
        }
    }

    /// Write the report
    pub fn render<W: WriteColor + ?Sized>(
        &self,
        out: &mut W,
        value: &Value,
        record: &IdentificationRecord,
    ) -> io::Result<()> {
        write_styled(out, TOP, Style::Border)?;
        writeln!(out)?;

        self.line(out, "", &self.title(value, record), Style::Title)?;
        self.labeled(out, "type: ", &record.type_tag.to_string())?;
        if let Some(line) = self.value_line(value, record) {
            let (label, rest) = line.split_at("value: ".len());
            self.labeled(out, label, rest)?;
        }

        write_styled(out, RULE, Style::Border)?;
        writeln!(out)?;

        if !record.children.is_empty() {
            for child in &record.children {
                if self.options.hide_common && self.identifier.config().is_common_member(&child.key) {
                    continue;
                }
                self.child(out, child, 0)?;
            }
        } else if record.type_tag == TypeTag::Function {
            for signature in record.signature_lines() {
                self.line(out, "", signature, Style::Signature)?;
            }
        }

        write_styled(out, BOTTOM, Style::Border)?;
        writeln!(out)
    }

    fn child<W: WriteColor + ?Sized>(
        &self,
        out: &mut W,
        child: &ChildRecord,
        level: usize,
    ) -> io::Result<()> {
        let indent = INDENT.repeat(level);
        let style = if child.type_tag == TypeTag::Function {
            Style::Signature
        } else {
            Style::Member
        };
        let mut lines = child.help_line.split('\n');
        if let Some(first) = lines.next() {
            self.line(out, &indent, first, style)?;
        }
        // Continuation lines carry their own `+` marker in the border column.
        for line in lines {
            write!(out, "{}", indent)?;
            write_styled(out, line, style)?;
            writeln!(out)?;
        }
        for nested in &child.children {
            self.child(out, nested, level + 1)?;
        }
        Ok(())
    }

    fn line<W: WriteColor + ?Sized>(
        &self,
        out: &mut W,
        indent: &str,
        text: &str,
        style: Style,
    ) -> io::Result<()> {
        write_styled(out, "| ", Style::Border)?;
        write!(out, "{}", indent)?;
        write_styled(out, text, style)?;
        writeln!(out)
    }

    fn labeled<W: WriteColor + ?Sized>(&self, out: &mut W, label: &str, text: &str) -> io::Result<()> {
        write_styled(out, "| ", Style::Border)?;
        write_styled(out, label, Style::Label)?;
        writeln!(out, "{}", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ident_core::{ForeignObject, IdentConfig};
    use termcolor::Buffer;

    fn render_with(value: &Value, config: &IdentConfig, options: ReportOptions) -> String {
        let identifier = Identifier::new(config);
        let record = identifier.identify(value);
        let mut buf = Buffer::no_color();
        HelpReport::new(&identifier, options)
            .render(&mut buf, value, &record)
            .unwrap();
        String::from_utf8(buf.into_inner()).unwrap()
    }

    fn render(value: &Value) -> String {
        render_with(value, &IdentConfig::default(), ReportOptions::default())
    }

    #[test]
    fn test_object_report() {
        let person = Value::object(vec![
            ("first", Value::from("Garin")),
            ("last", Value::from("Wally")),
        ]);
        let expected = [
            TOP,
            "| object",
            "| type: object",
            RULE,
            r#"| .first: string;  // "Garin""#,
            r#"| .last: string;  // "Wally""#,
            BOTTOM,
            "",
        ]
        .join("\n");
        assert_eq!(render(&person), expected);
    }

    #[test]
    fn test_function_report() {
        let text = render(&Value::function("function add(a, b){return a+b;}"));
        let expected = [TOP, "| add", "| type: function", RULE, "| add(a, b): unknown;", BOTTOM, ""]
            .join("\n");
        assert_eq!(text, expected);
    }

    #[test]
    fn test_overload_continuations_replace_border() {
        let obj = Value::object(vec![(
            "divide",
            Value::function(
                "function divide() {/*\nlong divide(long,long)\ndouble divide(double,double,int)\n*/}\n",
            ),
        )]);
        let text = render(&obj);
        assert!(text.contains(
            "| .divide(arg0: number, arg1: number): number;\n+ .divide(arg0: number, arg1: number, arg2: number): number;\n"
        ));
    }

    #[test]
    fn test_boxed_scalar_value_line() {
        let text = Value::foreign(ForeignObject::new("PRODUCTION").with_class("java.lang.String"));
        assert!(render(&text).contains("| JavaString\n| type: javaobject\n| value: 'PRODUCTION'\n"));

        let long = Value::foreign(ForeignObject::new("42").with_class("java.lang.Long"));
        assert!(render(&long).contains("| value: 42\n"));

        let date = Value::foreign(ForeignObject::new("Thu Jan 11").with_class("java.util.Date"));
        assert!(!render(&date).contains("value:"));
    }

    #[test]
    fn test_wrapper_result_title() {
        let ok = Value::foreign(
            ForeignObject::new("com.acme.dom.ScriptResult@1")
                .with_class("com.acme.dom.ScriptResult")
                .with_member(
                    "output",
                    Value::foreign(
                        ForeignObject::new("com.acme.model.CapIDModel@2")
                            .with_class("com.acme.model.CapIDModel"),
                    ),
                ),
        );
        assert!(render(&ok).contains("| ScriptResult<CapIDModel>\n"));

        let failed = Value::foreign(
            ForeignObject::new("com.acme.dom.ScriptResult@3")
                .with_class("com.acme.dom.ScriptResult")
                .with_member("output", Value::Null),
        );
        assert!(render(&failed).contains("| ScriptResult<unknown>\n"));

        let plain = Value::foreign(
            ForeignObject::new("com.acme.dom.ScriptResult@4").with_class("com.acme.dom.ScriptResult"),
        );
        assert!(render(&plain).contains("| ScriptResult\n"));
    }

    #[test]
    fn test_hide_common_members() {
        let obj = Value::object(vec![
            ("hashCode", Value::from(1)),
            ("capId", Value::from("14CAP")),
        ]);
        let shown = render(&obj);
        assert!(shown.contains("| .hashCode: number;  // 1\n"));

        let hidden = render_with(
            &obj,
            &IdentConfig::default(),
            ReportOptions { hide_common: true },
        );
        assert!(!hidden.contains("hashCode"));
        assert!(hidden.contains(r#"| .capId: string;  // "14CAP""#));
    }

    #[test]
    fn test_nested_children_indented() {
        let config = IdentConfig {
            max_depth: 2,
            ..IdentConfig::default()
        };
        let obj = Value::object(vec![("inner", Value::object(vec![("x", Value::from(1))]))]);
        let text = render_with(&obj, &config, ReportOptions::default());
        assert!(text.contains("| .inner: object;  // {\"x\":1}\n|   .x: number;  // 1\n"));
    }

    #[test]
    fn test_null_report() {
        let expected = [TOP, "| null", "| type: null", RULE, BOTTOM, ""].join("\n");
        assert_eq!(render(&Value::Null), expected);
    }
}

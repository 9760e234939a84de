//! The embedded default template and serialisation back to text.

use std::fmt::Write as _;

use crate::domain::models::document::{ConfigDocument, Section};

/// Origin recorded for entries that come from [`DEFAULT_TEMPLATE`].
pub const TEMPLATE_ORIGIN: &str = "<template>";

/// File name used when `setup` writes the template into `configdir`.
pub const CONFIG_FILENAME: &str = "wrapconf.cfg";

/// Default settings shipped with the wrapper.
pub const DEFAULT_TEMPLATE: &str = "\
# Default configuration for the tool wrapper.
# Values may reference other keys of the same section or of DEFAULT
# with %(name)s. A leading ~ in a path means the user's home directory.

[DEFAULT]
configdir = ~/.appconfig
qscriptdir = %(configdir)s/qscripts
templatesdir = %(configdir)s/templates

[ToolFamily]
# Version of the tool family to wrap; empty picks whatever is installed.
release =
# Tool identifiers to expose, separated by whitespace. Uncomment to enable.
## tools = gmx gmx_d
# Names of the tool groups to expose.
groups =

[Logging]
logfilename = app.log
# One of ERROR, WARN, INFO, DEBUG
loglevel_console = INFO
loglevel_file = DEBUG
";

fn write_section(out: &mut String, section: &Section) {
    let _ = writeln!(out, "[{}]", section.name());
    for (key, entry) in section.entries() {
        let mut lines = entry.value.split('\n');
        let first = lines.next().unwrap_or_default();
        if first.is_empty() {
            let _ = writeln!(out, "{key} =");
        } else {
            let _ = writeln!(out, "{key} = {first}");
        }
        for line in lines {
            let _ = writeln!(out, "    {line}");
        }
    }
}

/// Serialise `doc` to the file format, DEFAULT first, raw values verbatim.
///
/// Comments and blank lines of the source are not preserved.
pub fn to_ini_string(doc: &ConfigDocument) -> String {
    let mut out = String::new();
    if !doc.defaults().is_empty() {
        write_section(&mut out, doc.defaults());
    }
    for name in doc.sections() {
        if !out.is_empty() {
            out.push('\n');
        }
        if let Ok(section) = doc.section(name) {
            write_section(&mut out, section);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::document::DEFAULT_SECTION;
    use crate::infrastructure::config::parser::parse;

    #[test]
    fn test_template_parses_and_validates() {
        let doc = parse(DEFAULT_TEMPLATE, TEMPLATE_ORIGIN).unwrap();
        doc.validate().unwrap();
        assert_eq!(
            doc.get(DEFAULT_SECTION, "qscriptdir").unwrap(),
            "~/.appconfig/qscripts"
        );
        assert_eq!(doc.sections().collect::<Vec<_>>(), vec!["ToolFamily", "Logging"]);
        assert!(!doc.has_key("ToolFamily", "tools"));
    }

    #[test]
    fn test_serialised_document_reparses_equivalently() {
        let text = "[DEFAULT]\na = 1\nb = %(a)s/x\n\n[S]\nlist = one\n    two\nempty =\n";
        let doc = parse(text, "a.cfg").unwrap();
        let written = to_ini_string(&doc);
        let reparsed = parse(&written, "b.cfg").unwrap();

        assert_eq!(reparsed.get("S", "b").unwrap(), "1/x");
        assert_eq!(reparsed.get_raw("S", "list").unwrap(), "one\ntwo");
        assert_eq!(reparsed.get_raw("S", "empty").unwrap(), "");
        assert_eq!(reparsed.keys("S").unwrap(), doc.keys("S").unwrap());
    }

    #[test]
    fn test_serialisation_layout() {
        let doc = parse("[S]\nk = v\n[DEFAULT]\nd = 1\n", "a.cfg").unwrap();
        assert_eq!(to_ini_string(&doc), "[DEFAULT]\nd = 1\n\n[S]\nk = v\n");
    }
}

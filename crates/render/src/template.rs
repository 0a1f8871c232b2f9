//! Index page templates.
//!
//! Both pages are [upon] templates compiled once, when the [`IndexRenderer`]
//! is built, and rendered against plain values afterwards. The templates add
//! one formatter:
//!
//! - **`lower`**: lower-cases a string (Unicode-aware). Package names are
//!   sorted in their original case and only lower-cased on output, so this
//!   has to happen inside the template rather than before sorting.
//!
//! Values are written verbatim, without HTML escaping.
//!
//! # Example
//!
//! ```
//! use wheelhouse_render::{IndexRenderer, WheelLink};
//!
//! let renderer = IndexRenderer::new().unwrap();
//! let html = renderer.root_index(&["Django", "attrs"]).unwrap();
//! assert!(html.contains(r#"<a href="django/index.html">django</a><br/>"#));
//!
//! let digest = "ab".repeat(32);
//! let page = renderer.package_index(&[WheelLink::new("attrs-23.1.0-py3-none-any.whl", &digest)]).unwrap();
//! assert!(page.contains(&format!("attrs-23.1.0-py3-none-any.whl#sha256={digest}")));
//! ```

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use tracing::instrument;
use upon::{Engine, Template, Value};

const PACKAGE_INDEX: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Links</title>
</head>
<body>
    <h1>Links</h1>
{%- for wheel in wheels %}
    <a href="{{ wheel.name }}#sha256={{ wheel.sha256 }}">{{ wheel.name }}</a><br/>
{%- endfor %}
</body>
</html>
"#;

const ROOT_INDEX: &str = r#"<!DOCTYPE html>
<html>
  <body>
{%- for package in packages %}
    <a href="{{ package|lower }}/index.html">{{ package|lower }}</a><br/>
{%- endfor %}
  </body>
</html>
"#;

/// One wheel as it appears in a package index.
///
/// Ordered by file name, which is the listing order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct WheelLink {
    /// File name, used as both href and link text.
    pub name: String,
    /// Lowercase hex SHA-256 of the wheel's bytes.
    pub sha256: String,
}
impl WheelLink {
    pub fn new(name: impl Into<String>, sha256: impl Into<String>) -> Self {
        Self { name: name.into(), sha256: sha256.into() }
    }
}

/// Renders package and root index pages.
///
/// Holds no state besides the compiled templates, so one renderer serves a
/// whole run and identical input always produces identical output.
pub struct IndexRenderer {
    engine: Engine<'static>,
    package: Template<'static>,
    root: Template<'static>,
}
impl IndexRenderer {
    /// Compiles both templates up front so a broken template fails before any
    /// wheel is hashed.
    pub fn new() -> Result<Self> {
        let mut engine = Engine::new();
        addons::configure(&mut engine);
        let package = engine.compile(PACKAGE_INDEX).or_raise(|| ErrorKind::Template)?;
        let root = engine.compile(ROOT_INDEX).or_raise(|| ErrorKind::Template)?;
        Ok(Self { engine, package, root })
    }

    /// Renders a package index listing `wheels` sorted by file name.
    ///
    /// The caller's order doesn't matter. Each wheel becomes one
    /// `<a href="{name}#sha256={digest}">{name}</a>` line.
    #[instrument(skip_all, fields(wheels = wheels.len()))]
    pub fn package_index(&self, wheels: &[WheelLink]) -> Result<String> {
        let mut sorted: Vec<&WheelLink> = wheels.iter().collect();
        sorted.sort();
        let wheels: Vec<Value> = sorted
            .into_iter()
            .map(|wheel| {
                upon::value! {
                    name: wheel.name.as_str(),
                    sha256: wheel.sha256.as_str(),
                }
            })
            .collect();
        self.package
            .render(&self.engine, upon::value! { wheels: Value::List(wheels) })
            .to_string()
            .or_raise(|| ErrorKind::Render)
    }

    /// Renders the root index linking to every package's own index.
    ///
    /// Names are sorted as given (so `Foo` sorts before `bar`) and then
    /// lower-cased for both href and link text.
    #[instrument(skip_all, fields(packages = packages.len()))]
    pub fn root_index<S: AsRef<str>>(&self, packages: &[S]) -> Result<String> {
        let mut sorted: Vec<&str> = packages.iter().map(AsRef::as_ref).collect();
        sorted.sort_unstable();
        let packages: Vec<Value> = sorted.into_iter().map(Value::from).collect();
        self.root
            .render(&self.engine, upon::value! { packages: Value::List(packages) })
            .to_string()
            .or_raise(|| ErrorKind::Render)
    }
}

/// Custom [`upon`] extensions.
mod addons {
    use std::fmt::Write;
    use upon::{Engine, Value, fmt as upon_fmt};

    /// Lower-cases strings; anything else falls back to the default formatter.
    fn lower_formatter(f: &mut upon_fmt::Formatter<'_>, value: &Value) -> upon_fmt::Result {
        match value {
            Value::String(s) => write!(f, "{}", s.to_lowercase())?,
            v => upon_fmt::default(f, v)?,
        };
        Ok(())
    }

    /// Registers the `lower` formatter on the given engine.
    pub(crate) fn configure(engine: &mut Engine<'_>) {
        engine.add_formatter("lower", lower_formatter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const DIGEST_1: &str = "1111111111111111111111111111111111111111111111111111111111111111";
    const DIGEST_2: &str = "2222222222222222222222222222222222222222222222222222222222222222";

    fn renderer() -> IndexRenderer {
        IndexRenderer::new().unwrap()
    }

    #[test]
    fn test_package_index_exact_output() {
        let wheels = vec![
            WheelLink::new("alpha-2.0-py3-none-any.whl", DIGEST_2),
            WheelLink::new("alpha-1.0-py3-none-any.whl", DIGEST_1),
        ];
        let html = renderer().package_index(&wheels).unwrap();
        let expected = format!(
            "<!DOCTYPE html>\n<html>\n<head>\n    <title>Links</title>\n</head>\n<body>\n    <h1>Links</h1>\n    \
             <a href=\"alpha-1.0-py3-none-any.whl#sha256={DIGEST_1}\">alpha-1.0-py3-none-any.whl</a><br/>\n    \
             <a href=\"alpha-2.0-py3-none-any.whl#sha256={DIGEST_2}\">alpha-2.0-py3-none-any.whl</a><br/>\n\
             </body>\n</html>\n"
        );
        assert_eq!(html, expected);
    }

    #[test]
    fn test_package_index_empty() {
        let html = renderer().package_index(&[]).unwrap();
        assert_eq!(
            html,
            "<!DOCTYPE html>\n<html>\n<head>\n    <title>Links</title>\n</head>\n<body>\n    <h1>Links</h1>\n</body>\n</html>\n"
        );
    }

    #[test]
    fn test_package_index_ignores_input_order() {
        let renderer = renderer();
        let forward = vec![WheelLink::new("a.whl", DIGEST_1), WheelLink::new("b.whl", DIGEST_2)];
        let backward: Vec<_> = forward.iter().rev().cloned().collect();
        assert_eq!(renderer.package_index(&forward).unwrap(), renderer.package_index(&backward).unwrap());
    }

    #[test]
    fn test_package_index_keeps_name_case() {
        let html = renderer().package_index(&[WheelLink::new("Django-4.2-py3-none-any.whl", DIGEST_1)]).unwrap();
        assert!(html.contains(r#"<a href="Django-4.2-py3-none-any.whl#sha256="#));
        assert!(html.contains(">Django-4.2-py3-none-any.whl</a>"));
    }

    #[test]
    fn test_root_index_exact_output() {
        let html = renderer().root_index(&["beta", "alpha"]).unwrap();
        assert_eq!(
            html,
            "<!DOCTYPE html>\n<html>\n  <body>\n    \
             <a href=\"alpha/index.html\">alpha</a><br/>\n    \
             <a href=\"beta/index.html\">beta</a><br/>\n  \
             </body>\n</html>\n"
        );
    }

    #[test]
    fn test_root_index_empty() {
        let html = renderer().root_index::<&str>(&[]).unwrap();
        assert_eq!(html, "<!DOCTYPE html>\n<html>\n  <body>\n  </body>\n</html>\n");
        assert!(!html.contains("<a "));
    }

    #[rstest]
    #[case(&["foo", "Foo"], &["foo", "foo"])]
    #[case(&["bar", "Foo"], &["foo", "bar"])]
    #[case(&["Zope", "attrs", "Django"], &["django", "zope", "attrs"])]
    #[case(&["ÄBC", "abc"], &["abc", "äbc"])]
    fn test_root_index_sorts_before_lowering(#[case] input: &[&str], #[case] expected: &[&str]) {
        let html = renderer().root_index(input).unwrap();
        let texts: Vec<&str> = html
            .lines()
            .filter_map(|line| line.trim().strip_prefix("<a href=\""))
            .map(|rest| rest.split('/').next().unwrap())
            .collect();
        assert_eq!(texts, expected);
    }

    #[test]
    fn test_root_index_lowers_href_and_text() {
        let html = renderer().root_index(&["PyYAML"]).unwrap();
        assert!(html.contains(r#"<a href="pyyaml/index.html">pyyaml</a><br/>"#));
        assert!(!html.contains("PyYAML"));
    }
}

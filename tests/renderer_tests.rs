mod utils;

use babelizer::error::Error;
use babelizer::renderer::MiniJinjaRenderer;
use babelizer::template::render_tree;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use test_log::test;
use utils::assert_same_tree;

fn write(root: &Path, relative: &str, content: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn renders_names_and_contents() {
    let templates = TempDir::new().unwrap();
    write(templates.path(), "README.rst", b"{{ package.name }}\n");
    write(
        templates.path(),
        "{{ package.name }}/__init__.py",
        b"__version__ = \"{{ package_version }}\"\n",
    );
    write(
        templates.path(),
        "{{ package.name }}/lib/_c.pyx",
        b"{%- for name in library %}\n# start: {{ name|lower }}.pyx\n{%- endfor %}\n",
    );
    write(templates.path(), "setup.cfg.jinja", b"[metadata]\nname = {{ package.name }}\n");
    write(templates.path(), "logo.png", &[0x89, 0x50, 0x4e, 0x47, 0xff, 0xfe]);
    write(templates.path(), ".DS_Store", b"{{ broken");
    write(templates.path(), "{{ package.name }}/__pycache__/x.pyc", b"{{ broken");

    let expected = TempDir::new().unwrap();
    write(expected.path(), "README.rst", b"pymt_heat\n");
    write(expected.path(), "pymt_heat/__init__.py", b"__version__ = \"0.1\"\n");
    write(expected.path(), "pymt_heat/lib/_c.pyx", b"\n# start: heat.pyx\n# start: cool.pyx\n");
    write(expected.path(), "setup.cfg", b"[metadata]\nname = pymt_heat\n");
    write(expected.path(), "logo.png", &[0x89, 0x50, 0x4e, 0x47, 0xff, 0xfe]);

    let output = TempDir::new().unwrap();
    let context = json!({
        "package": {"name": "pymt_heat"},
        "package_version": "0.1",
        "library": {"Heat": {}, "Cool": {}},
    });
    let written =
        render_tree(&MiniJinjaRenderer::new(), templates.path(), &context, output.path()).unwrap();

    assert_eq!(written, 5);
    assert_same_tree(output.path(), expected.path());
}

#[test]
fn undefined_variable_fails_the_render() {
    let templates = TempDir::new().unwrap();
    write(templates.path(), "README.rst", b"{{ nope }}\n");
    let output = TempDir::new().unwrap();

    let err = render_tree(&MiniJinjaRenderer::new(), templates.path(), &json!({}), output.path())
        .unwrap_err();
    assert!(matches!(err, Error::MinijinjaError(_)), "{err:?}");
}

#[test]
fn empty_rendered_name_is_rejected() {
    let templates = TempDir::new().unwrap();
    write(templates.path(), "{{ package.name }}/__init__.py", b"");
    let output = TempDir::new().unwrap();
    let context = json!({"package": {"name": ""}});

    let err = render_tree(&MiniJinjaRenderer::new(), templates.path(), &context, output.path())
        .unwrap_err();
    assert!(matches!(err, Error::ProcessError { .. }), "{err:?}");
}

#[test]
fn datetimeformat_is_available() {
    let templates = TempDir::new().unwrap();
    write(templates.path(), "conf.py", b"copyright = \"{{ now|datetimeformat(\"%Y\") }}\"\n");
    let output = TempDir::new().unwrap();
    let context = json!({"now": "2024-03-05T14:07:00+00:00"});

    render_tree(&MiniJinjaRenderer::new(), templates.path(), &context, output.path()).unwrap();
    assert_eq!(
        fs::read_to_string(output.path().join("conf.py")).unwrap(),
        "copyright = \"2024\"\n"
    );
}

#[test]
fn missing_template_tree_is_a_render_error() {
    let output = TempDir::new().unwrap();
    let err = render_tree(
        &MiniJinjaRenderer::new(),
        &output.path().join("missing"),
        &json!({}),
        output.path(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::RenderError(_)));
}

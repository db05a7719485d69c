use pretty_assertions::assert_eq;
use textml_core::{ErrorKind, GeneratorKind, convert};

#[test]
fn html_headers_and_paragraphs() {
    let input = "<h 1>Дом\n<p ac>\nСлово\n<>";
    assert_eq!(
        convert(input, GeneratorKind::Html).unwrap(),
        "<h1>Дом</h1>\n<p style='text-align:center;'>Сло&shy;во</p>\n"
    );
}

#[test]
fn html_declared_links_wrap_prose_spans() {
    let input = "<$html_no_shys>y\n\
                 <link поиск>\n\
                 https://example.com/\n\
                 <>\n\
                 См. <поиск тут> дальше.";
    assert_eq!(
        convert(input, GeneratorKind::Html).unwrap(),
        "<p style='text-align:justify;'>См. \
         <a href='https://example.com/'>тут</a> дальше.</p>\n"
    );
}

#[test]
fn html_multilevel_list_with_terminator() {
    let input = "<#>один\n<#>два\n<.>";
    assert_eq!(
        convert(input, GeneratorKind::Html).unwrap(),
        "<ol>\n<li>один</li>\n<li>два</li>\n</ol>\n"
    );
}

#[test]
fn html_styling_variables_apply_to_tags() {
    let input = "<$html_p_class>note\n<p al>\nтак\n<>";
    assert_eq!(
        convert(input, GeneratorKind::Html).unwrap(),
        "<p class='note' style='text-align:left;'>так</p>\n"
    );
}

#[test]
fn html_preformatted_text_is_escaped_but_undecorated() {
    let input = "<pre>\nесли a < b\n<>";
    assert_eq!(
        convert(input, GeneratorKind::Html).unwrap(),
        "<pre>если a &lt; b</pre>\n"
    );
}

#[test]
fn tex_sections_and_verse() {
    let input = "<з 2>Пролог\n<стихи>\nпервая строка\nвторая\n<>";
    assert_eq!(
        convert(input, GeneratorKind::Tex).unwrap(),
        "\\section*{Пролог}\n\n\\begin{verse}\nпервая строка\\\\\nвторая\\end{verse}\n\n"
    );
}

#[test]
fn tex_escapes_reserved_characters() {
    let input = "скидка 100% за $5";
    assert_eq!(
        convert(input, GeneratorKind::Tex).unwrap(),
        "скидка 100\\% за \\$5\n\n"
    );
}

#[test]
fn unknown_tags_report_their_line() {
    let err = convert("строка\n<чепуха>", GeneratorKind::Html).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownTag);
    assert_eq!(err.line(), Some(2));
    assert_eq!(err.code(), 6);
}

#[test]
fn header_level_zero_is_rejected() {
    for kind in [GeneratorKind::Html, GeneratorKind::Tex] {
        let err = convert("<h 0>Заголовок", kind).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedHeaderLevel);
        assert_eq!(err.line(), Some(1));
    }
}

#[test]
fn close_without_anything_open_fails() {
    let err = convert("<>", GeneratorKind::Html).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedCloseTag);
    assert_eq!(err.line(), Some(1));
}

#[test]
fn duplicate_link_names_fail() {
    let input = "<link a>\nhttp://x/\n<>\n<link a>";
    let err = convert(input, GeneratorKind::Html).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InlineTagAlreadyExists);
    assert_eq!(err.line(), Some(4));
}

#[test]
fn skipping_a_list_level_fails() {
    let input = "<#>a\n<###>b";
    let err = convert(input, GeneratorKind::Html).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ListLevelHop);
    assert_eq!(err.line(), Some(2));
}

#[test]
fn injecting_an_undeclared_variable_fails() {
    let err = convert("и <$нет>", GeneratorKind::Tex).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::VariableNotDeclared);
    assert_eq!(err.line(), Some(1));
}

//! HTML fragments emitted in place of annotation tags.

fn typed(label: &str, type_name: &str, text: &str) -> String {
    if text.is_empty() {
        format!("<b>{label}</b> (<b><i>{type_name}</i></b>)</br>")
    } else {
        format!("<b>{label}</b> (<b><i>{type_name}</i></b>): {text}</br>")
    }
}

fn labelled(label: &str, text: &str) -> String {
    if text.is_empty() {
        format!("<b>{label}</b></br>")
    } else {
        format!("<b>{label}</b> {text}</br>")
    }
}

pub fn param(name: &str, type_name: Option<&str>, text: &str) -> String {
    match type_name {
        Some(type_name) => typed(name, type_name, text),
        None => labelled(name, text),
    }
}

pub fn returns(type_name: Option<&str>, text: &str) -> String {
    match type_name {
        Some(type_name) => typed("returns", type_name, text),
        None => labelled("returns:", text),
    }
}

pub fn return_type(type_name: &str) -> String {
    labelled("return type:", type_name)
}

pub fn raises(text: &str) -> String {
    labelled("raises:", text)
}

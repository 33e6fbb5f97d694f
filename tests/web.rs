// Browser smoke tests; run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use learnquest_page::motion::Pose;
use learnquest_page::stage::Stage;
use learnquest_page::web::{apply_pose, DomStage};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn mount(html: &str) -> web_sys::HtmlElement {
    let doc = web_sys::window().unwrap().document().unwrap();
    let host: web_sys::HtmlElement = doc.create_element("div").unwrap().dyn_into().unwrap();
    host.set_inner_html(html);
    doc.body().unwrap().append_child(&host).unwrap();
    host
}

#[wasm_bindgen_test]
fn stage_reads_attributes_and_children() {
    let host = mount(
        r#"<div class="progress-bar"><div class="progress-fill" data-progress="40"></div></div>
           <div class="subjects-grid"><div></div><div></div></div>"#,
    );
    let stage = DomStage::new().unwrap();
    let bar = stage.select(".progress-bar").unwrap();
    let fill = stage.select_within(&bar, ".progress-fill").unwrap();
    assert_eq!(stage.attribute(&fill, "data-progress").as_deref(), Some("40"));
    let grid = stage.select(".subjects-grid").unwrap();
    assert_eq!(stage.children(&grid).len(), 2);
    assert!(stage.viewport().height > 0.0);
    host.remove();
}

#[wasm_bindgen_test]
fn poses_become_inline_styles() {
    let host = mount(r#"<div class="xp-fill"></div>"#);
    let stage = DomStage::new().unwrap();
    let fill = stage.select(".xp-fill").unwrap();
    apply_pose(&fill, &Pose::new().width_pct(65.0).opacity(0.5).y(-5.0));
    let style = fill.style();
    assert_eq!(style.get_property_value("width").unwrap(), "65%");
    assert_eq!(style.get_property_value("opacity").unwrap(), "0.5");
    assert!(style.get_property_value("transform").unwrap().contains("-5px"));
    host.remove();
}

#[wasm_bindgen_test]
fn language_switch_rewrites_marked_text() {
    let host = mount(r#"<span data-i18n="nav-home">Home</span><span class="lang-text">EN</span>"#);
    assert_eq!(learnquest_page::select_language("hi").unwrap(), "hi");
    let doc = web_sys::window().unwrap().document().unwrap();
    let label = doc.query_selector("[data-i18n=nav-home]").unwrap().unwrap();
    assert_eq!(label.text_content().as_deref(), Some("होम"));
    assert_eq!(learnquest_page::select_language("zz").unwrap(), "en");
    host.remove();
}

//! Lotonu entry point
//!
//! Web: wires the DOM to the `App` controller. Native: prints a summary of
//! the file-backed data set.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlInputElement, HtmlSelectElement, KeyboardEvent};

    use lotonu::consts::MAX_POS;
    use lotonu::platform::LocalStorage;
    use lotonu::view::consult_view;
    use lotonu::{App, AppError, Category, LoadOutcome, Rendered, ViewKind};

    type SharedApp = Rc<RefCell<App<LocalStorage>>>;

    fn current_document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn alert(message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn confirm(message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Lotonu starting...");

        let storage = LocalStorage::open().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let (app, report) = App::new(storage);
        match &report.outcome {
            LoadOutcome::Restored => {}
            LoadOutcome::Initialized => log::info!("Started with empty data"),
            LoadOutcome::Recovered(e) => log::warn!("Stored data was reset: {e}"),
        }
        if let Some(e) = report.save_error {
            alert(&format!("Failed to save data: {e}"));
        }

        let app = Rc::new(RefCell::new(app));
        let document = current_document();

        render_all(&document, &app.borrow())?;
        setup_category_nav(&document, app.clone());
        setup_submenu_nav(&document, app.clone());
        setup_content_handlers(&document, app.clone());
        setup_reset_button(&document, app);

        // Hide loading indicator
        if let Some(loader) = document.get_element_by_id("loader") {
            let _ = loader.set_attribute("class", "hidden");
        }

        log::info!("Lotonu running!");
        Ok(())
    }

    fn render_all(document: &Document, app: &App<LocalStorage>) -> Result<(), JsValue> {
        render_categories(document, app.category())?;
        render_submenus(document, app.view())?;
        render_content(document, app)
    }

    fn render_categories(document: &Document, current: Category) -> Result<(), JsValue> {
        let Some(nav) = document.get_element_by_id("categoryNav") else {
            return Ok(());
        };
        nav.set_inner_html("");
        for cat in Category::ALL {
            let btn = document.create_element("button")?;
            let class = if cat == current { "category-btn active" } else { "category-btn" };
            btn.set_class_name(class);
            btn.set_attribute("data-category", cat.as_str())?;
            btn.set_text_content(Some(cat.as_str()));
            nav.append_child(&btn)?;
        }
        Ok(())
    }

    fn render_submenus(document: &Document, current: ViewKind) -> Result<(), JsValue> {
        let Some(nav) = document.get_element_by_id("submenuNav") else {
            return Ok(());
        };
        nav.set_inner_html("");
        for view in ViewKind::ALL {
            let btn = document.create_element("button")?;
            let class = if view == current { "submenu-btn active" } else { "submenu-btn" };
            btn.set_class_name(class);
            btn.set_attribute("data-view", view.as_str())?;
            btn.set_text_content(Some(view.label()));
            nav.append_child(&btn)?;
        }
        Ok(())
    }

    fn element(document: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
        let el = document.create_element(tag)?;
        if !class.is_empty() {
            el.set_class_name(class);
        }
        Ok(el)
    }

    fn text_input(document: &Document, id: &str, placeholder: &str) -> Result<Element, JsValue> {
        let input = document.create_element("input")?;
        input.set_id(id);
        input.set_attribute("type", "text")?;
        input.set_attribute("placeholder", placeholder)?;
        input.set_attribute("autocomplete", "off")?;
        Ok(input)
    }

    fn button(document: &Document, id: &str, label: &str) -> Result<Element, JsValue> {
        let btn = element(document, "button", "btn")?;
        btn.set_id(id);
        btn.set_text_content(Some(label));
        Ok(btn)
    }

    /// Append `rendered.lines` as list items under `parent`
    fn append_lines(document: &Document, parent: &Element, rendered: &Rendered) -> Result<(), JsValue> {
        let list = element(document, "ul", "entries-list")?;
        for line in &rendered.lines {
            let item = document.create_element("li")?;
            item.set_text_content(Some(line));
            list.append_child(&item)?;
        }
        parent.append_child(&list)?;
        Ok(())
    }

    fn render_content(document: &Document, app: &App<LocalStorage>) -> Result<(), JsValue> {
        let Some(content) = document.get_element_by_id("dynamicContent") else {
            return Ok(());
        };
        content.set_inner_html("");

        let section = match app.view() {
            ViewKind::Entries => {
                let section = element(document, "section", "entry-section")?;
                let form = element(document, "div", "entry-form")?;
                form.append_child(&text_input(document, "entryNum", "Number (000-999)")?)?;
                let select = document.create_element("select")?;
                select.set_id("entryPos");
                for pos in 0..=MAX_POS {
                    let option = document.create_element("option")?;
                    option.set_attribute("value", &pos.to_string())?;
                    option.set_text_content(Some(&format!("P{}", pos + 1)));
                    select.append_child(&option)?;
                }
                form.append_child(&select)?;
                form.append_child(&text_input(document, "entryValue", "Value (0-9)")?)?;
                form.append_child(&button(document, "saveEntryBtn", "Save")?)?;
                section.append_child(&form)?;

                let rendered = app.render();
                let feedback = element(document, "div", "entry-feedback")?;
                let heading = document.create_element("h3")?;
                heading.set_text_content(Some(&rendered.title));
                feedback.append_child(&heading)?;
                append_lines(document, &feedback, &rendered)?;
                section.append_child(&feedback)?;
                section
            }
            ViewKind::Consult => {
                let section = element(document, "section", "consult-section")?;
                let heading = document.create_element("h2")?;
                heading.set_text_content(Some(&consult_view(app.category()).title));
                section.append_child(&heading)?;
                let form = element(document, "div", "consult-form")?;
                form.append_child(&text_input(document, "searchNum", "Search (000-999)")?)?;
                form.append_child(&button(document, "searchBtn", "Search")?)?;
                section.append_child(&form)?;
                let result = element(document, "div", "consult-result")?;
                result.set_id("consultResult");
                section.append_child(&result)?;
                section
            }
            ViewKind::Stats => {
                let rendered = app.render();
                let section = element(document, "section", "stats-section")?;
                let heading = document.create_element("h2")?;
                heading.set_text_content(Some(&rendered.title));
                section.append_child(&heading)?;
                for line in &rendered.lines {
                    let p = document.create_element("p")?;
                    p.set_text_content(Some(line));
                    section.append_child(&p)?;
                }
                section
            }
        };
        content.append_child(&section)?;
        Ok(())
    }

    fn input_value(document: &Document, id: &str) -> String {
        document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .unwrap_or_default()
    }

    fn select_value(document: &Document, id: &str) -> String {
        document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
            .map(|select| select.value())
            .unwrap_or_default()
    }

    fn save_entry(app: &SharedApp) {
        let document = current_document();
        let num = input_value(&document, "entryNum");
        let pos = select_value(&document, "entryPos");
        let value = input_value(&document, "entryValue");

        let result = app.borrow_mut().submit_entry(&num, &pos, &value);
        match result {
            Ok(_) => {}
            Err(e @ AppError::Input(_)) => {
                alert(&e.user_message());
                return;
            }
            // Entry is kept in memory; tell the user and redraw anyway
            Err(e @ AppError::Store(_)) => alert(&e.user_message()),
        }
        if let Err(e) = render_content(&document, &app.borrow()) {
            log::error!("Render failed: {:?}", e);
        }
    }

    fn search(app: &SharedApp) {
        let document = current_document();
        let raw = input_value(&document, "searchNum");
        let Some(result_el) = document.get_element_by_id("consultResult") else {
            return;
        };
        result_el.set_inner_html("");

        let outcome = app.borrow_mut().search(&raw);
        let rendered = match outcome {
            Ok(rendered) => rendered,
            Err(e) => {
                log::warn!("Rejected search input: {e}");
                if let Ok(p) = element(&document, "p", "error") {
                    p.set_text_content(Some("Invalid number."));
                    let _ = result_el.append_child(&p);
                }
                return;
            }
        };
        let draw = || -> Result<(), JsValue> {
            let p = document.create_element("p")?;
            p.set_text_content(Some(&rendered.title));
            result_el.append_child(&p)?;
            append_lines(&document, &result_el, &rendered)
        };
        if let Err(e) = draw() {
            log::error!("Render failed: {:?}", e);
        }
    }

    /// Data attribute of the clicked element, if any
    fn target_data(event: &web_sys::Event, attr: &str) -> Option<String> {
        event
            .target()?
            .dyn_into::<Element>()
            .ok()?
            .get_attribute(attr)
    }

    fn target_id(event: &web_sys::Event) -> Option<String> {
        Some(event.target()?.dyn_into::<Element>().ok()?.id())
    }

    fn setup_category_nav(document: &Document, app: SharedApp) {
        let Some(nav) = document.get_element_by_id("categoryNav") else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
            let Some(cat) = target_data(&event, "data-category").and_then(|c| Category::from_str(&c))
            else {
                return;
            };
            app.borrow_mut().select_category(cat);
            let document = current_document();
            let g = app.borrow();
            if let Err(e) = render_categories(&document, g.category())
                .and_then(|_| render_content(&document, &g))
            {
                log::error!("Render failed: {:?}", e);
            }
        });
        let _ = nav.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_submenu_nav(document: &Document, app: SharedApp) {
        let Some(nav) = document.get_element_by_id("submenuNav") else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
            let Some(view) = target_data(&event, "data-view").and_then(|v| ViewKind::from_str(&v))
            else {
                return;
            };
            app.borrow_mut().select_view(view);
            let document = current_document();
            let g = app.borrow();
            if let Err(e) =
                render_submenus(&document, g.view()).and_then(|_| render_content(&document, &g))
            {
                log::error!("Render failed: {:?}", e);
            }
        });
        let _ = nav.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Delegated handlers on the content container, which is rebuilt on every render
    fn setup_content_handlers(document: &Document, app: SharedApp) {
        let Some(content) = document.get_element_by_id("dynamicContent") else {
            return;
        };

        // Buttons
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
                match target_id(&event).as_deref() {
                    Some("saveEntryBtn") => save_entry(&app),
                    Some("searchBtn") => search(&app),
                    _ => {}
                }
            });
            let _ = content.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Enter submits from the text fields
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() != "Enter" {
                    return;
                }
                match target_id(&event).as_deref() {
                    Some("entryNum") | Some("entryValue") => save_entry(&app),
                    Some("searchNum") => search(&app),
                    _ => {}
                }
            });
            let _ = content.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_reset_button(document: &Document, app: SharedApp) {
        let Some(btn) = document.get_element_by_id("resetBtn") else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            if !confirm("Reset all data?") {
                return;
            }
            let result = app.borrow_mut().factory_reset();
            if let Err(e) = result {
                alert(&e.user_message());
            }
            if let Err(e) = render_content(&current_document(), &app.borrow()) {
                log::error!("Render failed: {:?}", e);
            }
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_app::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lotonu::platform::FileStorage;
    use lotonu::view::{entries_view, stats_view};
    use lotonu::{App, Category, LoadOutcome};

    env_logger::init();

    let storage = FileStorage::from_env();
    log::info!("Lotonu (native) using {}", storage.dir().display());

    let (app, report) = App::new(storage);
    match &report.outcome {
        LoadOutcome::Restored => {}
        LoadOutcome::Initialized => log::info!("Started with empty data"),
        LoadOutcome::Recovered(e) => log::warn!("Stored data was reset: {e}"),
    }
    if let Some(e) = &report.save_error {
        eprintln!("Failed to save data: {e}");
    }

    let store = app.store();
    for cat in Category::ALL {
        print!("{}", stats_view(cat, store.stats(cat)));
        print!("{}", entries_view(cat, store.entries(cat)));
        println!();
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

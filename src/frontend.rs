use gloo_events::{EventListener, EventListenerOptions};
use gloo_timers::callback::Timeout;
use js_sys::{Array, Function, Object, Reflect};
use serde_json::json;
use std::{cell::RefCell, rc::Rc, time::Duration};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Document, Element, Event, EventTarget, HtmlElement, HtmlImageElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent,
    MouseEvent, ScrollBehavior, ScrollToOptions,
};

use crate::{
    charts::{
        format_tooltip_label, ActivePoint, SkillChart, TooltipAction, TooltipController,
        SKILL_CHARTS,
    },
    config::InteractionConfig,
    modal::{ModalEvent, PhotoModal},
    navbar::{LinkHighlight, MenuState, NavHighlighter, ACTIVE_CLASS, SCROLL_LOCK_CLASS},
    orbit::{stylesheet, OrbitDecorator, PlayState, ORBIT_SELECTOR},
    reveal::{RevealAnimator, StyleDecl, REVEALED_STYLE, REVEAL_SELECTOR},
    scroll::{plan_scroll, ScrollMotion, ANCHOR_SELECTOR},
    telemetry::{log_event, LogLevel},
    typing::{TypingEffect, TypingTimings},
    visibility::{ObserverOptions, Subscription, VisibilityEntry, VisibilityTracker},
};

type Wired = Result<(), &'static str>;

pub fn run() {
    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };

    let ready_state = Reflect::get(&document, &JsValue::from_str("readyState"))
        .ok()
        .and_then(|value| value.as_string());

    if ready_state.as_deref() == Some("loading") {
        let loaded = document.clone();
        EventListener::once(&document, "DOMContentLoaded", move |_| init(&loaded)).forget();
    } else {
        init(&document);
    }
}

fn init(document: &Document) {
    let config = read_config(document);
    let reduced_motion = prefers_reduced_motion();

    let features: [(&str, Wired); 7] = [
        ("navbar", init_navbar(document)),
        ("typing", init_typing_effect(document, &config)),
        ("orbits", init_orbit_animations(document, &config, reduced_motion)),
        ("photo_modal", init_photo_modal(document, &config)),
        ("smooth_scroll", init_smooth_scroll(document, &config, reduced_motion)),
        ("section_reveal", init_section_reveal(document, reduced_motion)),
        ("skill_charts", init_skill_charts(document)),
    ];

    let mut wired = Vec::new();
    for (feature, outcome) in features {
        match outcome {
            Ok(()) => wired.push(feature),
            Err(reason) => log_event(
                &config,
                LogLevel::Debug,
                "feature_skipped",
                json!({ "feature": feature, "reason": reason }),
            ),
        }
    }

    log_event(
        &config,
        LogLevel::Info,
        "portfolio_ready",
        json!({ "features": wired, "reducedMotion": reduced_motion }),
    );
}

fn read_config(document: &Document) -> InteractionConfig {
    let root = document.document_element();
    InteractionConfig::from_lookup(|key| root.as_ref()?.get_attribute(&format!("data-{key}")))
}

fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };

    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn query_one(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

fn set_class(element: &Element, class: &str, enabled: bool) {
    let _ = if enabled {
        element.class_list().add_1(class)
    } else {
        element.class_list().remove_1(class)
    };
}

fn set_styles(element: &Element, declarations: &[StyleDecl]) {
    let Some(element) = element.dyn_ref::<HtmlElement>() else {
        return;
    };

    let style = element.style();
    for (property, value) in declarations {
        let _ = style.set_property(property, value);
    }
}

fn timeout_millis(delay: Duration) -> u32 {
    u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)
}

/* ---------- visibility ---------- */

fn intersection_observer_supported() -> bool {
    window()
        .map(|w| Reflect::has(&w, &JsValue::from_str("IntersectionObserver")).unwrap_or(false))
        .unwrap_or(false)
}

/// Observes `targets` and hands each batch to `on_batch` as entries indexed
/// by position in `targets`.
fn observe_visibility(
    targets: &[Element],
    options: ObserverOptions,
    mut on_batch: impl FnMut(Vec<VisibilityEntry>, &IntersectionObserver) + 'static,
) -> Wired {
    if targets.is_empty() {
        return Err("nothing to observe");
    }
    if !intersection_observer_supported() {
        return Err("intersection observer unavailable");
    }

    let known = targets.to_vec();
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            let batch = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .filter_map(|entry| {
                    let target = entry.target();
                    let index = known.iter().position(|candidate| *candidate == target)?;
                    Some(VisibilityEntry {
                        index,
                        is_intersecting: entry.is_intersecting(),
                    })
                })
                .collect();
            on_batch(batch, &observer);
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(&options.root_margin.to_css());

    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
        .map_err(|_| "intersection observer rejected options")?;
    callback.forget();

    for target in targets {
        observer.observe(target);
    }

    Ok(())
}

/* ---------- navbar ---------- */

fn init_navbar(document: &Document) -> Wired {
    let hamburger = document.get_element_by_id("hamburger");
    let nav_menu = document.get_element_by_id("nav-menu");
    let nav_links = query_all(document, ".nav-link");
    let body = document.body();
    let menu = Rc::new(RefCell::new(MenuState::default()));
    let mut wired = false;

    if let (Some(toggle), Some(_)) = (&hamburger, &nav_menu) {
        let menu = menu.clone();
        let hamburger = hamburger.clone();
        let nav_menu = nav_menu.clone();
        let body = body.clone();
        EventListener::new(toggle, "click", move |_| {
            let open = menu.borrow_mut().toggle();
            apply_menu_state(open, hamburger.as_ref(), nav_menu.as_ref(), body.as_ref());
        })
        .forget();
        wired = true;
    }

    for link in &nav_links {
        let menu = menu.clone();
        let hamburger = hamburger.clone();
        let nav_menu = nav_menu.clone();
        let body = body.clone();
        EventListener::new(link, "click", move |_| {
            menu.borrow_mut().close();
            apply_menu_state(false, hamburger.as_ref(), nav_menu.as_ref(), body.as_ref());
        })
        .forget();
        wired = true;
    }

    let sections = query_all(document, "section[id]");
    let mut highlighter = NavHighlighter::new(
        nav_links.iter().map(|link| link.get_attribute("href")).collect(),
        sections.iter().map(Element::id).collect(),
    );
    let mut tracker = VisibilityTracker::new(sections.len(), Subscription::Repeating);
    let links = nav_links.clone();

    let highlighting = observe_visibility(&sections, ObserverOptions::NAVBAR, move |batch, _| {
        let outcome = tracker.process(batch);
        match highlighter.apply(outcome.visible()) {
            LinkHighlight::Unchanged => {}
            LinkHighlight::Cleared => {
                links.iter().for_each(|link| set_class(link, ACTIVE_CLASS, false));
            }
            LinkHighlight::Active(active) => {
                for (index, link) in links.iter().enumerate() {
                    set_class(link, ACTIVE_CLASS, index == active);
                }
            }
        }
    });

    if highlighting.is_ok() || wired {
        Ok(())
    } else {
        Err("navbar markup missing")
    }
}

fn apply_menu_state(
    open: bool,
    hamburger: Option<&Element>,
    nav_menu: Option<&Element>,
    body: Option<&HtmlElement>,
) {
    if let Some(hamburger) = hamburger {
        set_class(hamburger, ACTIVE_CLASS, open);
    }
    if let Some(nav_menu) = nav_menu {
        set_class(nav_menu, ACTIVE_CLASS, open);
    }
    if let Some(body) = body {
        set_class(body, SCROLL_LOCK_CLASS, open);
    }
}

/* ---------- typing ---------- */

fn init_typing_effect(document: &Document, config: &InteractionConfig) -> Wired {
    let target = document
        .get_element_by_id("typing-text")
        .ok_or("missing #typing-text")?;
    let effect = TypingEffect::new(&config.typing_phrases, TypingTimings::from_config(config))
        .ok_or("no typing phrases")?;

    target.set_text_content(Some(&effect.text()));
    let delay = effect.initial_delay();
    schedule_typing(target, effect, delay);
    Ok(())
}

fn schedule_typing(target: Element, mut effect: TypingEffect, delay: Duration) {
    Timeout::new(timeout_millis(delay), move || {
        let frame = effect.step();
        target.set_text_content(Some(&frame.text));
        schedule_typing(target, effect, frame.delay);
    })
    .forget();
}

/* ---------- orbits ---------- */

fn init_orbit_animations(
    document: &Document,
    config: &InteractionConfig,
    reduced_motion: bool,
) -> Wired {
    let planets = query_all(document, ORBIT_SELECTOR);
    if planets.is_empty() {
        return Err("no orbit elements");
    }

    let orbits = OrbitDecorator::new(config, fastrand::Rng::new()).decorate(planets.len());
    let head = document.head().ok_or("missing document head")?;
    let keyframes = document
        .create_element("style")
        .map_err(|_| "cannot create style element")?;
    keyframes.set_text_content(Some(&stylesheet(&orbits)));
    head.append_child(&keyframes)
        .map_err(|_| "cannot inject orbit keyframes")?;

    let initial_state = if reduced_motion {
        PlayState::Paused
    } else {
        PlayState::Running
    };

    for (planet, orbit) in planets.iter().zip(&orbits) {
        let Some(element) = planet.dyn_ref::<HtmlElement>() else {
            continue;
        };

        let style = element.style();
        let _ = style.set_property("animation", &orbit.animation());
        let _ = style.set_property("animation-play-state", initial_state.as_css());
        let _ = style.set_property("transform", &orbit.initial_transform());

        if reduced_motion {
            continue;
        }

        for (event, entered) in [("mouseenter", true), ("mouseleave", false)] {
            let style = style.clone();
            EventListener::new(planet, event, move |_| {
                let _ = style.set_property("animation-play-state", PlayState::on_hover(entered).as_css());
            })
            .forget();
        }
    }

    Ok(())
}

/* ---------- photo modal ---------- */

fn init_photo_modal(document: &Document, config: &InteractionConfig) -> Wired {
    let sun = query_one(document, ".sun-core").ok_or("missing .sun-core")?;
    let overlay = document
        .get_element_by_id("photo-modal")
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        .ok_or("missing #photo-modal")?;
    let close = query_one(document, ".close").ok_or("missing .close")?;
    let photo = document
        .get_element_by_id("random-photo")
        .and_then(|element| element.dyn_into::<HtmlImageElement>().ok())
        .ok_or("missing #random-photo")?;
    let win = window().ok_or("missing window")?;

    let modal = RefCell::new(PhotoModal::new(
        config.photo_url_template.clone(),
        fastrand::Rng::new(),
    ));
    let dispatch: Rc<dyn Fn(ModalEvent)> = {
        let overlay = overlay.clone();
        Rc::new(move |event: ModalEvent| {
            let Some(update) = modal.borrow_mut().handle(event) else {
                return;
            };

            if let Some(url) = update.photo_url.as_deref() {
                photo.set_src(url);
            }

            let style = overlay.style();
            let _ = style.set_property("display", update.style.display);
            let _ = style.set_property("opacity", update.style.opacity);
            let _ = style.set_property("transition", update.style.transition);
        })
    };

    {
        let dispatch = dispatch.clone();
        EventListener::new(&sun, "click", move |_| dispatch(ModalEvent::TriggerClick)).forget();
    }

    {
        let dispatch = dispatch.clone();
        EventListener::new(&close, "click", move |_| dispatch(ModalEvent::CloseClick)).forget();
    }

    {
        let dispatch = dispatch.clone();
        let overlay: EventTarget = overlay.into();
        EventListener::new(&win, "click", move |event: &Event| {
            let on_overlay = event.target().is_some_and(|target| target == overlay);
            dispatch(ModalEvent::WindowClick { on_overlay });
        })
        .forget();
    }

    EventListener::new(document, "keydown", move |event: &Event| {
        if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
            dispatch(ModalEvent::KeyDown(event.key()));
        }
    })
    .forget();

    Ok(())
}

/* ---------- smooth scroll ---------- */

fn init_smooth_scroll(document: &Document, config: &InteractionConfig, reduced_motion: bool) -> Wired {
    let anchors = query_all(document, ANCHOR_SELECTOR);
    if anchors.is_empty() {
        return Err("no in-page anchors");
    }

    let behavior = match ScrollMotion::for_reduced_motion(reduced_motion) {
        ScrollMotion::Smooth => ScrollBehavior::Smooth,
        ScrollMotion::Instant => ScrollBehavior::Instant,
    };
    let header_offset = config.scroll_offset_px;

    for anchor in anchors {
        let document = document.clone();
        let link = anchor.clone();
        EventListener::new_with_options(
            &anchor,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event: &Event| {
                let Some(win) = window() else {
                    return;
                };

                let href = link.get_attribute("href").unwrap_or_default();
                let scroll_y = win.scroll_y().unwrap_or(0.0);
                let Some(top) = plan_scroll(&href, scroll_y, header_offset, |id| {
                    document
                        .get_element_by_id(id)
                        .map(|target| target.get_bounding_client_rect().top())
                }) else {
                    return;
                };

                event.prevent_default();
                let options = ScrollToOptions::new();
                options.set_top(top);
                options.set_behavior(behavior);
                win.scroll_to_with_scroll_to_options(&options);
            },
        )
        .forget();
    }

    Ok(())
}

/* ---------- section reveal ---------- */

fn init_section_reveal(document: &Document, reduced_motion: bool) -> Wired {
    let elements = query_all(document, REVEAL_SELECTOR);
    if elements.is_empty() {
        return Err("no reveal elements");
    }
    if !reduced_motion && !intersection_observer_supported() {
        return Err("intersection observer unavailable");
    }

    let mut animator = RevealAnimator::new(elements.len(), reduced_motion);
    for element in &elements {
        set_styles(element, animator.initial_style());
    }

    if !animator.needs_observer() {
        return Ok(());
    }

    let targets = elements.clone();
    observe_visibility(&elements, ObserverOptions::REVEAL, move |batch, observer| {
        let outcome = animator.on_batch(batch);

        for index in outcome.visible() {
            if let Some(element) = targets.get(index) {
                set_styles(element, REVEALED_STYLE);
            }
        }

        for index in &outcome.unobserve {
            if let Some(element) = targets.get(*index) {
                observer.unobserve(element);
            }
        }
    })
}

/* ---------- skill charts ---------- */

fn init_skill_charts(document: &Document) -> Wired {
    let constructor = window()
        .and_then(|w| Reflect::get(&w, &JsValue::from_str("Chart")).ok())
        .and_then(|value| value.dyn_into::<Function>().ok())
        .ok_or("Chart.js not loaded")?;

    let mut created = 0;
    for chart in SKILL_CHARTS {
        let Some(canvas) = document.get_element_by_id(chart.canvas_id) else {
            continue;
        };

        if create_skill_chart(&constructor, &canvas, &chart).is_ok() {
            created += 1;
        }
    }

    if created == 0 {
        Err("no skill chart canvas")
    } else {
        Ok(())
    }
}

fn create_skill_chart(
    constructor: &Function,
    canvas: &Element,
    chart: &SkillChart,
) -> Result<(), JsValue> {
    let config_json = serde_json::to_string(&chart.config())
        .map_err(|error| JsValue::from_str(&error.to_string()))?;
    let config = js_sys::JSON::parse(&config_json)?;

    let label = Closure::<dyn Fn(JsValue) -> JsValue>::new(|context: JsValue| {
        let label = js_get(&context, "label")
            .ok()
            .and_then(|value| value.as_string())
            .unwrap_or_default();
        let value = js_get(&context, "raw")
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(0.0);
        JsValue::from_str(&format_tooltip_label(&label, value))
    });

    let callbacks = Object::new();
    Reflect::set(&callbacks, &JsValue::from_str("label"), label.as_ref())?;
    Reflect::set(
        &js_path(&config, &["options", "plugins", "tooltip"])?,
        &JsValue::from_str("callbacks"),
        &callbacks,
    )?;
    label.forget();

    let instance = Reflect::construct(constructor, &Array::of2(canvas, &config))?;
    wire_click_tooltips(canvas, instance);
    Ok(())
}

fn wire_click_tooltips(canvas: &Element, chart: JsValue) {
    let mut tooltips = TooltipController::default();

    EventListener::new(canvas, "click", move |event: &Event| {
        let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
            return;
        };

        let hits = chart_hits(&chart, event);
        let click = tooltips.on_click(
            hits,
            f64::from(mouse.offset_x()),
            f64::from(mouse.offset_y()),
        );

        if click.newly_enabled {
            if let Ok(tooltip_options) = js_path(&chart, &["options", "plugins", "tooltip"]) {
                let _ = Reflect::set(&tooltip_options, &JsValue::from_str("enabled"), &JsValue::TRUE);
            }
        }

        let (elements, x, y) = match click.action {
            TooltipAction::Show { points, x, y } => (active_elements(&points), x, y),
            TooltipAction::Clear => (Array::new(), 0.0, 0.0),
        };

        let position = Object::new();
        let _ = Reflect::set(&position, &JsValue::from_str("x"), &JsValue::from_f64(x));
        let _ = Reflect::set(&position, &JsValue::from_str("y"), &JsValue::from_f64(y));

        if let Ok(tooltip) = js_get(&chart, "tooltip") {
            let _ = call_method(&tooltip, "setActiveElements", &Array::of2(&elements, &position));
        }
        let _ = call_method(&chart, "update", &Array::new());
    })
    .forget();
}

fn chart_hits(chart: &JsValue, event: &Event) -> Vec<ActivePoint> {
    let mode_options = Object::new();
    let _ = Reflect::set(&mode_options, &JsValue::from_str("intersect"), &JsValue::TRUE);
    let args = Array::of4(
        event,
        &JsValue::from_str("nearest"),
        &mode_options,
        &JsValue::TRUE,
    );

    let Ok(found) = call_method(chart, "getElementsAtEventForMode", &args) else {
        return Vec::new();
    };
    let Ok(found) = found.dyn_into::<Array>() else {
        return Vec::new();
    };

    found
        .iter()
        .filter_map(|item| {
            let dataset_index = js_get(&item, "datasetIndex").ok()?.as_f64()?;
            let index = js_get(&item, "index").ok()?.as_f64()?;
            Some(ActivePoint {
                dataset_index: dataset_index as usize,
                index: index as usize,
            })
        })
        .collect()
}

fn active_elements(points: &[ActivePoint]) -> Array {
    points
        .iter()
        .map(|point| {
            let element = Object::new();
            let _ = Reflect::set(
                &element,
                &JsValue::from_str("datasetIndex"),
                &JsValue::from_f64(point.dataset_index as f64),
            );
            let _ = Reflect::set(
                &element,
                &JsValue::from_str("index"),
                &JsValue::from_f64(point.index as f64),
            );
            JsValue::from(element)
        })
        .collect()
}

fn js_get(target: &JsValue, key: &str) -> Result<JsValue, JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
}

fn js_path(target: &JsValue, path: &[&str]) -> Result<JsValue, JsValue> {
    path.iter()
        .try_fold(target.clone(), |current, key| js_get(&current, key))
}

fn call_method(target: &JsValue, name: &str, args: &Array) -> Result<JsValue, JsValue> {
    let method = js_get(target, name)?.dyn_into::<Function>()?;
    method.apply(target, args)
}

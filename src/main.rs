//! Main module for The Hang List using Yew.
//! Wires the session hook to the view components.

use hang_list::config::{AppConfig, PREP_STEP_SECS};
use hang_list::{logger, Action, HttpCatalogSource, Level, Phase};
use log::info;
use std::rc::Rc;
use yew::prelude::*;

mod components;
mod hooks;

use components::{Benefits, Controls, HangReadout, LevelPicker, SessionSummary, Stage};
use hooks::use_session;

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub source: Rc<HttpCatalogSource>,
    pub initial_prep_secs: u32,
    /// Page origin passed to the video embed.
    pub origin: Option<AttrValue>,
}

/// Primary application component: one session, one set of controls.
#[function_component]
pub fn App(props: &AppProps) -> Html {
    let session = use_session(props.source.clone(), props.initial_prep_secs);

    let timer = &session.timer;
    let idle = timer.is_idle();

    let on_level = {
        let session = session.clone();
        Callback::from(move |level: Level| session.dispatch(Action::ChangeLevel(level)))
    };
    let on_adjust = {
        let session = session.clone();
        Callback::from(move |delta: i32| session.dispatch(Action::AdjustPrep(delta)))
    };
    let on_start = {
        let session = session.clone();
        Callback::from(move |_: ()| session.dispatch(Action::Start))
    };
    let on_reset = {
        let session = session.clone();
        Callback::from(move |_: ()| session.dispatch(Action::Reset))
    };

    html! {
        <main class="app">
            <section class="timer-screen">
                <h1 class="title">{ "The Hang List" }</h1>

                <LevelPicker selected={timer.selected_level} disabled={!idle} onselect={on_level} />

                <Stage
                    phase={timer.phase}
                    countdown={timer.countdown_remaining}
                    progress={timer.progress()}
                    record={timer.active_record.clone()}
                    origin={props.origin.clone()}
                    onreset={on_reset}
                />

                <SessionSummary record={timer.active_record.clone()} loaded={session.loaded} />

                if timer.phase == Phase::Playing {
                    <HangReadout remaining={timer.active_remaining} />
                }

                <Controls
                    prep_secs={timer.prep_secs}
                    step_secs={PREP_STEP_SECS}
                    adjustable={idle}
                    can_start={timer.can_start()}
                    onadjust={on_adjust}
                    onstart={on_start}
                />

                <div class="scroll-hint">{ "Scroll for benefits ↓" }</div>
            </section>

            <Benefits />
        </main>
    }
}

/// Entry point: reads page overrides, installs logging and renders the app.
fn main() {
    console_error_panic_hook::set_once();

    let location = gloo_utils::window().location();
    let config = AppConfig::from_query(&location.search().unwrap_or_default());
    logger::init(config.log_level);

    let source = HttpCatalogSource::new(config.catalog_url);
    info!("Loading sessions from {}", source.url());

    let props = AppProps {
        source: Rc::new(source),
        initial_prep_secs: config.initial_prep_secs,
        origin: location.origin().ok().map(AttrValue::from),
    };
    yew::Renderer::<App>::with_props(props).render();
}

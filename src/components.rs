//! Pure Yew view components for The Hang List.
//!
//! Every component renders from props only; user intents leave through
//! callbacks and are turned into state machine actions by the caller.

use hang_list::utils::{embed_url, percent_width};
use hang_list::{Level, Phase, SessionRecord};
use yew::prelude::*;

/// Difficulty picker. Disabled outside `Idle`.
#[derive(Properties, PartialEq)]
pub struct LevelPickerProps {
    pub selected: Level,
    pub disabled: bool,
    pub onselect: Callback<Level>,
}

#[function_component(LevelPicker)]
pub fn level_picker(props: &LevelPickerProps) -> Html {
    html! {
        <div class="level-picker">
            { Level::ALL.iter().map(|&level| {
                let classes = classes!(
                    "level-button",
                    (props.selected == level).then_some("selected"),
                    props.disabled.then_some("locked"),
                );
                let onclick = props.onselect.reform(move |_: MouseEvent| level);
                html! {
                    <button key={level.as_str()} class={classes} disabled={props.disabled} {onclick}>
                        { level.as_str() }
                    </button>
                }
            }).collect::<Html>() }
        </div>
    }
}

/// Prep-time adjuster and start button.
#[derive(Properties, PartialEq)]
pub struct ControlsProps {
    pub prep_secs: u32,
    pub step_secs: i32,
    pub adjustable: bool,
    pub can_start: bool,
    pub onadjust: Callback<i32>,
    pub onstart: Callback<()>,
}

#[function_component(Controls)]
pub fn controls(props: &ControlsProps) -> Html {
    let step = props.step_secs;
    let on_less = props.onadjust.reform(move |_: MouseEvent| -step);
    let on_more = props.onadjust.reform(move |_: MouseEvent| step);
    let on_start = props.onstart.reform(|_: MouseEvent| ());

    html! {
        <div class="controls">
            <div class="control-row">
                <button class="prep-button less" disabled={!props.adjustable} onclick={on_less}>
                    { format!("- {}", step) }
                </button>
                <button class="start-button" disabled={!props.can_start} onclick={on_start}>
                    { "START" }
                </button>
                <button class="prep-button more" disabled={!props.adjustable} onclick={on_more}>
                    { format!("+ {}", step) }
                </button>
            </div>
            <p class="prep-readout">
                <span class="accent">{ format!("[ {}s ]", props.prep_secs) }</span>
                { " PREP TIME" }
            </p>
        </div>
    }
}

/// Stage area: idle prompt, countdown digits, the video with its progress
/// bar, or the completion banner.
#[derive(Properties, PartialEq)]
pub struct StageProps {
    pub phase: Phase,
    pub countdown: u32,
    pub progress: f64,
    pub record: Option<SessionRecord>,
    pub origin: Option<AttrValue>,
    pub onreset: Callback<()>,
}

#[function_component(Stage)]
pub fn stage(props: &StageProps) -> Html {
    let body = match props.phase {
        Phase::Idle => html! {
            <div class="idle-prompt">{ "Ready for today's challenge?" }</div>
        },
        Phase::Counting => html! {
            <div class="countdown">{ props.countdown }</div>
        },
        Phase::Playing => match &props.record {
            Some(record) => {
                let src = embed_url(
                    &record.video_ref,
                    record.video_start_secs,
                    props.origin.as_deref(),
                );
                html! {
                    <>
                        <iframe class="video" {src}
                            allow="autoplay; encrypted-media; picture-in-picture"
                        />
                        <div class="progress-track">
                            <div class="progress-fill" style={format!("width: {}", percent_width(props.progress))} />
                        </div>
                    </>
                }
            }
            None => html! {},
        },
        Phase::Finished => html! {
            <div class="finished">
                <div class="finished-banner">{ "🏆 CHALLENGE COMPLETED!" }</div>
                <button class="retry-button" onclick={props.onreset.reform(|_: MouseEvent| ())}>
                    { "TRY AGAIN" }
                </button>
            </div>
        },
    };

    html! { <div class="stage">{ body }</div> }
}

#[derive(Properties, PartialEq)]
pub struct HangReadoutProps {
    pub remaining: u32,
}

#[function_component(HangReadout)]
pub fn hang_readout(props: &HangReadoutProps) -> Html {
    html! {
        <div class="hang-readout">
            { "[ " }<span class="accent">{ format!("{}s", props.remaining) }</span>{ " ] LEFT ON BAR" }
        </div>
    }
}

/// Title and length of the bound session, or a notice when there is none.
#[derive(Properties, PartialEq)]
pub struct SessionSummaryProps {
    pub record: Option<SessionRecord>,
    pub loaded: bool,
}

#[function_component(SessionSummary)]
pub fn session_summary(props: &SessionSummaryProps) -> Html {
    match (&props.record, props.loaded) {
        (Some(record), _) => {
            let title = if record.title.is_empty() {
                "Untitled session"
            } else {
                record.title.as_str()
            };
            html! {
                <p class="session-summary">
                    { format!("{} · {} · {}s", title, record.level, record.duration_secs) }
                </p>
            }
        }
        (None, true) => html! {
            <p class="session-summary empty">{ "No sessions available" }</p>
        },
        (None, false) => html! {
            <p class="session-summary loading">{ "Loading sessions…" }</p>
        },
    }
}

const BENEFITS: [(&str, &str, &str); 3] = [
    (
        "🦴",
        "Spinal Decompression",
        "Hours of sitting compress your spine. A simple 2-minute hang flips the script on gravity and decompresses your back",
    ),
    (
        "🖐️ 💪",
        "Grip & Shoulder Decompression",
        "Grip strength is the ultimate health indicator. Stabilize your shoulders and unlock real functional strength",
    ),
    (
        "🧠",
        "Mental Focus",
        "Boost mental focus by acting as a form of active meditation, teaching you to stay calm under physical discomfort, building willpower, and improving breath control, which carries over into everyday stress management and concentration",
    ),
];

#[function_component(Benefits)]
pub fn benefits() -> Html {
    html! {
        <section class="benefits">
            <h2>{ "The benefits" }</h2>
            <div class="benefit-grid">
                { BENEFITS.iter().map(|(icon, title, text)| html! {
                    <div class="benefit-card" key={*title}>
                        <div class="benefit-icon">{ *icon }</div>
                        <h3>{ *title }</h3>
                        <p>{ *text }</p>
                    </div>
                }).collect::<Html>() }
            </div>
        </section>
    }
}

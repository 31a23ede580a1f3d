use hang_list::catalog::{load_catalog, CatalogSource};
use hang_list::config::TICK_MS;
use hang_list::ticker::{IntervalScheduler, Ticker};
use hang_list::{Action, Session};
use std::rc::Rc;
use yew::prelude::*;

/// Custom hook owning the session state machine and its tick source.
///
/// - loads the catalog once on mount
/// - keeps exactly one interval alive while a ticking phase is current
/// - runs the zero-counter evaluation after every state change
#[hook]
pub fn use_session(source: Rc<dyn CatalogSource>, initial_prep_secs: u32) -> UseReducerHandle<Session> {
    let session = use_reducer(|| Session::new(initial_prep_secs));
    let ticker = use_mut_ref(|| Ticker::new(IntervalScheduler, TICK_MS));

    // Load sessions on mount; failures leave the catalog empty.
    {
        let dispatcher = session.dispatcher();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let catalog = load_catalog(source.as_ref()).await;
                dispatcher.dispatch(Action::CatalogLoaded(Rc::new(catalog)));
            });
            || ()
        });
    }

    // Restart the tick source on every phase change, cancel on unmount.
    // The `Harness` in tests/session_flow.rs replays this and the next effect.
    {
        let dispatcher = session.dispatcher();
        let ticker = ticker.clone();
        use_effect_with(session.timer.phase, move |phase| {
            ticker
                .borrow_mut()
                .sync(*phase, move |scheduled_for| dispatcher.dispatch(Action::Tick(scheduled_for)));
            move || ticker.borrow_mut().stop()
        });
    }

    // A counter that already reads zero moves on without waiting a tick.
    {
        let dispatcher = session.dispatcher();
        let needs_advance = session.timer.needs_advance();
        use_effect_with((session.timer.phase, needs_advance), move |&(_, needs_advance)| {
            if needs_advance {
                dispatcher.dispatch(Action::Advance);
            }
            || ()
        });
    }

    session
}

use crate::config;
use crate::engine::SpinEngine;
use crate::events::AppEvent;
use crate::store::ItemStore;
use palette::Srgb;
use spindle::Item;

/// Ties the event stream to the store and the engine.
///
/// The store is the source of truth for the item list; the engine holds the
/// wedge cache and all spin state. Edits that arrive mid-spin are applied to
/// the store immediately and pushed to the engine right after the spin
/// completes, since the engine freezes its wheel while spinning.
pub struct App {
    store: ItemStore,
    engine: SpinEngine,
    remaining_spins: u32,
    listen: bool,
    wheel_dirty: bool,
}

impl App {
    pub fn new(store: ItemStore, mut engine: SpinEngine, spins: u32, listen: bool) -> Self {
        engine.set_items(store.snapshot());
        let app = Self {
            store,
            engine,
            remaining_spins: spins,
            listen,
            wheel_dirty: false,
        };
        app.print_legend();
        app
    }

    /// Applies one event; returns `false` when the loop should stop.
    pub fn update(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::Spin => {
                if !self.start_spin() && !self.engine.is_spinning() && !self.listen {
                    // one-shot run with an empty wheel: nothing will ever complete
                    return false;
                }
            }
            AppEvent::SpinComplete => {
                let completed = self.engine.is_spinning();
                self.engine.finish_spin();
                if self.wheel_dirty {
                    self.sync_wheel();
                }
                if !completed {
                    // stray completion: no scheduled spin was consumed
                    return true;
                }
                if self.remaining_spins > 0 {
                    self.remaining_spins -= 1;
                }
                if self.remaining_spins > 0 {
                    self.start_spin();
                } else if !self.listen {
                    return false;
                }
            }
            AppEvent::AddItem(title) => {
                if self.store.add(&title).is_some() {
                    self.sync_wheel();
                    self.print_legend();
                }
            }
            AppEvent::RenameItem(id, title) => {
                if self.store.rename(id, &title) {
                    self.sync_wheel();
                    self.print_legend();
                }
            }
            AppEvent::RemoveItem(id) => {
                if self.store.remove(id) {
                    self.sync_wheel();
                    self.print_legend();
                }
            }
            AppEvent::ReplaceItems(titles) => {
                self.store.replace_all(titles);
                self.sync_wheel();
                self.print_legend();
            }
            AppEvent::List => self.print_legend(),
            AppEvent::ConfigReload => match config::load_config() {
                Ok(new_config) => match new_config.spin_settings() {
                    Ok(settings) => {
                        self.engine.apply_settings(settings);
                        log::info!("Spin settings reloaded");
                    }
                    Err(e) => log::error!("Failed to apply reloaded config: {e}"),
                },
                Err(e) => log::error!("Failed to reload config: {e}"),
            },
            AppEvent::Quit => return false,
        }
        true
    }

    fn start_spin(&mut self) -> bool {
        let accepted = self
            .engine
            .request_spin(|| log::info!("wheel spinning"), |item| announce(&item));
        if !accepted {
            log::warn!("spin request ignored");
        }
        accepted
    }

    fn sync_wheel(&mut self) {
        if self.engine.is_spinning() {
            self.wheel_dirty = true;
            return;
        }
        self.engine.set_items(self.store.snapshot());
        self.wheel_dirty = false;
    }

    fn print_legend(&self) {
        let items = self.engine.items();
        if items.is_empty() {
            println!("(no items on the wheel)");
            return;
        }
        for (wedge, item) in self.engine.current_wedges().iter().zip(items) {
            println!(
                "  {} {:>3}  [{:>5.1}°, {:>5.1}°)  {}",
                swatch(item),
                item.id(),
                wedge.start.to_degrees(),
                wedge.end.to_degrees(),
                item.title(),
            );
        }
    }
}

fn announce(item: &Item) {
    println!("\n  {}  the wheel stops on: {}\n", swatch(item), item.title());
}

/// Two-cell ANSI swatch from the item's wedge gradient stops.
fn swatch(item: &Item) -> String {
    let (inner, outer) = item.colors();
    let (inner, outer): (Srgb<u8>, Srgb<u8>) = (inner.into_format(), outer.into_format());
    format!(
        "\x1b[38;2;{};{};{}m\u{25cf}\x1b[38;2;{};{};{}m\u{25cf}\x1b[0m",
        inner.red, inner.green, inner.blue, outer.red, outer.green, outer.blue,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SpinSettings;
    use crate::sys::animator::RecordingAnimator;
    use spindle::{FixedTurns, ItemId};

    fn app(titles: &[&str], spins: u32, listen: bool) -> App {
        let mut store = ItemStore::new();
        for title in titles {
            store.add(title);
        }
        let engine = SpinEngine::new(
            SpinSettings::default(),
            Box::new(FixedTurns(1.0)),
            Box::new(RecordingAnimator::default()),
        );
        App::new(store, engine, spins, listen)
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut app = app(&["A"], 0, true);
        assert!(!app.update(AppEvent::Quit));
    }

    #[test]
    fn one_shot_run_exits_after_its_spin() {
        let mut app = app(&["A", "B"], 1, false);
        assert!(app.update(AppEvent::Spin));
        assert!(app.engine.is_spinning());
        assert!(!app.update(AppEvent::SpinComplete));
        assert!(!app.engine.is_spinning());
    }

    #[test]
    fn multi_spin_run_chains_spins() {
        let mut app = app(&["A", "B"], 2, false);
        assert!(app.update(AppEvent::Spin));
        // first completion starts the second spin
        assert!(app.update(AppEvent::SpinComplete));
        assert!(app.engine.is_spinning());
        assert!(!app.update(AppEvent::SpinComplete));
    }

    #[test]
    fn stray_completion_does_not_consume_the_spin_budget() {
        let mut app = app(&["A"], 2, false);
        // completion with nothing in flight is ignored outright
        assert!(app.update(AppEvent::SpinComplete));

        assert!(app.update(AppEvent::Spin));
        // both budgeted spins still run
        assert!(app.update(AppEvent::SpinComplete));
        assert!(app.engine.is_spinning());
        assert!(!app.update(AppEvent::SpinComplete));
    }

    #[test]
    fn empty_wheel_one_shot_exits_immediately() {
        let mut app = app(&[], 1, false);
        assert!(!app.update(AppEvent::Spin));
    }

    #[test]
    fn empty_wheel_stays_inert_while_listening() {
        let mut app = app(&[], 0, true);
        assert!(app.update(AppEvent::Spin));
        assert!(!app.engine.is_spinning());
    }

    #[test]
    fn list_edits_flow_through_to_the_engine() {
        let mut app = app(&["A"], 0, true);
        assert!(app.update(AppEvent::AddItem("B".to_owned())));
        assert_eq!(app.engine.current_wedges().len(), 2);

        let id = app.store.items()[0].id();
        assert!(app.update(AppEvent::RemoveItem(id)));
        assert_eq!(app.engine.current_wedges().len(), 1);

        // unknown ids change nothing
        assert!(app.update(AppEvent::RemoveItem(ItemId::from(404))));
        assert_eq!(app.engine.current_wedges().len(), 1);

        assert!(app.update(AppEvent::ReplaceItems(vec![
            "X".to_owned(),
            "Y".to_owned(),
            "Z".to_owned(),
        ])));
        assert_eq!(app.engine.current_wedges().len(), 3);
    }

    #[test]
    fn mid_spin_edits_apply_after_completion() {
        let mut app = app(&["A", "B", "C"], 0, true);
        assert!(app.update(AppEvent::Spin));

        assert!(app.update(AppEvent::AddItem("D".to_owned())));
        // the in-flight spin keeps its wheel
        assert_eq!(app.engine.current_wedges().len(), 3);

        assert!(app.update(AppEvent::SpinComplete));
        assert_eq!(app.engine.current_wedges().len(), 4);
    }
}

//! Sector detail panel: celestial views for the clicked sector.

use std::cell::RefCell;
use std::rc::Rc;

use api::{ApiClient, ApiError, Celestial, CelestialKind, Sector};
use serde_json::Value;

use crate::world::WorldEvents;

/// View model of one celestial in the panel.
#[derive(Debug, Clone)]
pub struct CelestialView {
    pub name: String,
    pub kind: CelestialKind,
    /// Capitalized `Name: value` feature pairs (everything but the kind).
    pub features: Vec<(String, String)>,
    pub habitated: bool,
}

#[derive(Debug, Clone)]
pub struct SectorView {
    pub name: String,
    pub celestials: Vec<CelestialView>,
}

/// Owns the sector detail view and the *default* map-click handler: it is
/// registered first, so every mode pushed later dispatches ahead of it.
pub struct SectorPanel {
    api: Rc<dyn ApiClient>,
    view: RefCell<Option<SectorView>>,
    /// The sector resource backing the current view (the build menu needs
    /// its celestials and process URL).
    current: RefCell<Option<Sector>>,
}

impl SectorPanel {
    pub fn new(api: Rc<dyn ApiClient>) -> Rc<Self> {
        Rc::new(Self {
            api,
            view: RefCell::new(None),
            current: RefCell::new(None),
        })
    }

    /// Registers the default handler. It shows or hides the panel depending
    /// on whether the clicked field is a sector, and always lets the click
    /// fall through.
    pub fn attach(self: &Rc<Self>, events: &WorldEvents) {
        let panel = Rc::downgrade(self);
        events.hex_field_click.push(move |click| {
            if let Some(panel) = panel.upgrade() {
                panel.on_click(click.sector.as_deref());
            }
            true
        });
    }

    fn on_click(&self, sector_url: Option<&str>) {
        match sector_url {
            Some(url) => match self.load(url) {
                Ok((sector, view)) => {
                    self.current.replace(Some(sector));
                    self.view.replace(Some(view));
                }
                Err(e) => log::warn!("could not load sector view: {}", e),
            },
            None => {
                self.current.replace(None);
                self.view.replace(None);
            }
        }
    }

    fn load(&self, url: &str) -> Result<(Sector, SectorView), ApiError> {
        let sector: Sector = api::get(&*self.api, &api::with_depth(url, 1))?;
        let celestials = sector
            .celestial_set
            .iter()
            .filter_map(|related| related.full())
            .map(|celestial| celestial_view(&sector, celestial))
            .collect();
        let view = SectorView {
            name: sector.name.clone(),
            celestials,
        };
        Ok((sector, view))
    }

    pub fn view(&self) -> Option<SectorView> {
        self.view.borrow().clone()
    }

    pub fn current(&self) -> Option<Sector> {
        self.current.borrow().clone()
    }
}

/// Display name of a celestial: the sector's name, suffixed with the orbital
/// position for everything but the central body.
pub fn celestial_name(sector: &Sector, celestial: &Celestial) -> String {
    if celestial.position > 0 {
        format!("{} {}", sector.name, celestial.position)
    } else {
        sector.name.clone()
    }
}

fn celestial_view(sector: &Sector, celestial: &Celestial) -> CelestialView {
    let features = celestial
        .features
        .extra
        .iter()
        .map(|(key, value)| (capitalize(key), display_value(value)))
        .collect();
    CelestialView {
        name: celestial_name(sector, celestial),
        kind: celestial.features.kind,
        features,
        habitated: celestial.habitated_by.is_some(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{seed_world, url, StubApi};
    use crate::world::HexFieldClick;
    use client_core::EventStack;
    use hexgrid::HexCoord;

    fn events() -> WorldEvents {
        WorldEvents {
            hex_field_click: EventStack::new(),
        }
    }

    fn click(coord: HexCoord, sector: Option<String>) -> HexFieldClick {
        HexFieldClick { coord, sector }
    }

    #[test]
    fn default_handler_builds_the_sector_view() {
        let stub = StubApi::new();
        seed_world(&stub);
        let panel = SectorPanel::new(Rc::clone(&stub) as Rc<dyn ApiClient>);
        let events = events();
        panel.attach(&events);

        events
            .hex_field_click
            .fire(&click(HexCoord::new(0, 0), Some(url("sectors/1/"))));

        let view = panel.view().expect("sector view");
        assert_eq!(view.name, "Castor");
        assert_eq!(view.celestials.len(), 2);

        let star = &view.celestials[0];
        assert_eq!(star.name, "Castor");
        assert_eq!(star.kind, CelestialKind::Star);
        assert!(star.habitated);
        assert!(star.features.contains(&("Brightness".to_string(), "G2".to_string())));

        let planet = &view.celestials[1];
        assert_eq!(planet.name, "Castor 1");
        assert_eq!(planet.kind, CelestialKind::Planet);
        assert!(!planet.habitated);
        assert!(planet.features.contains(&("Capacity".to_string(), "3".to_string())));

        assert!(panel.current().is_some());
    }

    #[test]
    fn clicking_an_empty_field_hides_the_panel() {
        let stub = StubApi::new();
        seed_world(&stub);
        let panel = SectorPanel::new(Rc::clone(&stub) as Rc<dyn ApiClient>);
        let events = events();
        panel.attach(&events);

        events
            .hex_field_click
            .fire(&click(HexCoord::new(0, 0), Some(url("sectors/1/"))));
        assert!(panel.view().is_some());

        events.hex_field_click.fire(&click(HexCoord::new(2, 0), None));
        assert!(panel.view().is_none());
        assert!(panel.current().is_none());
    }

    #[test]
    fn default_handler_never_vetoes_the_click() {
        let stub = StubApi::new();
        seed_world(&stub);
        let panel = SectorPanel::new(Rc::clone(&stub) as Rc<dyn ApiClient>);
        let events = events();

        // Registered before the panel, so it only runs if the panel's
        // handler returns true.
        let reached = Rc::new(std::cell::Cell::new(false));
        let flag = Rc::clone(&reached);
        events.hex_field_click.push(move |_| {
            flag.set(true);
            true
        });
        panel.attach(&events);

        events
            .hex_field_click
            .fire(&click(HexCoord::new(0, 0), Some(url("sectors/1/"))));
        assert!(reached.get());
    }
}

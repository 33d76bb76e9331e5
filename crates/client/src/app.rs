//! Module wiring: construct the UI modules in dependency order and share
//! typed references. No globals, no module registry; the composition is
//! spelled out here.

use std::rc::Rc;

use anyhow::{Context, Result};
use api::ApiClient;
use glam::Vec2;
use hexgrid::HexLayout;

use crate::blueprints::BlueprintStore;
use crate::build::BuildMenu;
use crate::config::ClientConfig;
use crate::movables::MovablesPanel;
use crate::sector::SectorPanel;
use crate::world::WorldMap;

/// The wired client. One instance per session; the modules share references
/// and communicate through the map's event stack.
pub struct App {
    pub world: Rc<WorldMap>,
    pub build: Rc<BuildMenu>,
    pub sector: Rc<SectorPanel>,
    pub movables: Rc<MovablesPanel>,
}

impl App {
    /// Wires the modules and runs the initial load.
    ///
    /// Handler registration order matters: the sector panel registers the
    /// default click handler first, so the fleet list (and any mode armed
    /// later) dispatches ahead of it.
    pub fn new(api: Rc<dyn ApiClient>, config: &ClientConfig) -> Result<Self> {
        let blueprints = Rc::new(BlueprintStore::new(Rc::clone(&api)));
        let world = Rc::new(WorldMap::new(
            Rc::clone(&api),
            Rc::clone(&blueprints),
            HexLayout::new(config.hex_field_size),
            Vec2::new(config.viewport.0, config.viewport.1),
        ));
        let build = BuildMenu::new(Rc::clone(&api), Rc::clone(&blueprints));
        let sector = SectorPanel::new(Rc::clone(&api));
        sector.attach(&world.events);
        let movables = MovablesPanel::new(Rc::clone(&api), Rc::clone(&blueprints));
        movables.attach(&world);

        world.load().context("initial world load")?;

        Ok(Self {
            world,
            build,
            sector,
            movables,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{seed_world, url, StubApi};
    use hexgrid::HexCoord;
    use std::rc::Rc;

    fn make_app(stub: &Rc<StubApi>) -> App {
        let api = Rc::clone(stub) as Rc<dyn ApiClient>;
        App::new(api, &ClientConfig::default()).unwrap()
    }

    #[test]
    fn clicking_a_sector_updates_both_panels() {
        let stub = StubApi::new();
        seed_world(&stub);
        let app = make_app(&stub);

        app.world.click(HexCoord::new(0, 0));
        assert_eq!(app.sector.view().unwrap().name, "Castor");
        assert!(app.movables.views().is_empty()); // no fleet at the home sector

        app.world.click(HexCoord::new(1, 1));
        assert!(app.sector.view().is_none());
        assert_eq!(app.movables.views().len(), 1);
    }

    #[test]
    fn move_order_mode_intercepts_then_restores_default_behavior() {
        let stub = StubApi::new();
        seed_world(&stub);
        let app = make_app(&stub);

        app.world.click(HexCoord::new(1, 1));
        let fleet = app.movables.views()[0].movable.clone();
        app.movables.begin_move_order(&app.world, &fleet);

        // The sector panel still shows nothing: the next click is consumed
        // by the one-shot before either panel handler runs.
        app.world.click(HexCoord::new(0, 0));
        assert!(app.sector.view().is_none());
        assert_eq!(stub.posts.borrow().len(), 1);
        assert_eq!(stub.posts.borrow()[0].0, url("movables/4/move_to/"));

        // Default behavior is back.
        app.world.click(HexCoord::new(0, 0));
        assert_eq!(app.sector.view().unwrap().name, "Castor");
    }
}

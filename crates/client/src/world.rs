//! Galaxy map: hex fields, sectors, movables, and the hex-field click event.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use glam::Vec2;

use api::{ApiClient, ApiError, Celestial, Empire, Movable, Sector, Unveiled, User, WorldStatus};
use client_core::{EventStack, TurnStatus};
use hexgrid::{HexCoord, HexLayout};

use crate::blueprints::BlueprintStore;

/// Payload of a map click: the field's coordinates, plus the sector URL when
/// the field holds a sector.
#[derive(Debug, Clone)]
pub struct HexFieldClick {
    pub coord: HexCoord,
    pub sector: Option<String>,
}

/// Events published by the map. Collaborators share a reference and only
/// ever push, pop, or fire.
pub struct WorldEvents {
    /// Fired when a hex field is clicked.
    pub hex_field_click: EventStack<HexFieldClick>,
}

/// One unveiled field of the galaxy map.
#[derive(Debug, Clone)]
pub struct HexField {
    pub coord: HexCoord,
    /// Set when the field holds a populated sector.
    pub sector_name: Option<String>,
    pub sector_url: Option<String>,
}

impl HexField {
    pub fn is_sector(&self) -> bool {
        self.sector_url.is_some()
    }
}

/// The map module: owns the unveiled fields, the movables index, the turn
/// clock, and the click event stack.
pub struct WorldMap {
    api: Rc<dyn ApiClient>,
    blueprints: Rc<BlueprintStore>,
    pub events: Rc<WorldEvents>,
    layout: HexLayout,
    viewport: Vec2,
    fields: RefCell<HashMap<HexCoord, HexField>>,
    movables: RefCell<HashMap<HexCoord, Vec<Movable>>>,
    offset: Cell<Vec2>,
    center: Cell<Option<HexCoord>>,
    status: Cell<Option<TurnStatus>>,
    empire: RefCell<Option<Empire>>,
}

impl WorldMap {
    pub fn new(
        api: Rc<dyn ApiClient>,
        blueprints: Rc<BlueprintStore>,
        layout: HexLayout,
        viewport: Vec2,
    ) -> Self {
        Self {
            api,
            blueprints,
            events: Rc::new(WorldEvents {
                hex_field_click: EventStack::new(),
            }),
            layout,
            viewport,
            fields: RefCell::new(HashMap::new()),
            movables: RefCell::new(HashMap::new()),
            offset: Cell::new(Vec2::ZERO),
            center: Cell::new(None),
            status: Cell::new(None),
            empire: RefCell::new(None),
        }
    }

    /// Runs the initial load: unveiled fields, sectors, movables (with their
    /// ship blueprints), home-world centering, turn clock.
    pub fn load(&self) -> Result<(), ApiError> {
        self.load_fields()?;
        self.load_movables()?;
        self.center_on_home()?;
        self.refresh_status()?;
        Ok(())
    }

    fn load_fields(&self) -> Result<(), ApiError> {
        let unveiled: Vec<Unveiled> =
            api::get(&*self.api, &api::collection_url(&*self.api, "unveiled", None))?;
        {
            let mut fields = self.fields.borrow_mut();
            for entry in unveiled {
                fields.insert(
                    entry.position,
                    HexField {
                        coord: entry.position,
                        sector_name: None,
                        sector_url: None,
                    },
                );
            }
        }

        let sectors: Vec<Sector> =
            api::get(&*self.api, &api::collection_url(&*self.api, "sectors", Some(1)))?;
        let mut fields = self.fields.borrow_mut();
        for sector in sectors {
            match fields.get_mut(&sector.position) {
                Some(field) => {
                    field.sector_name = Some(sector.name);
                    field.sector_url = Some(sector.url);
                }
                None => log::warn!(
                    "sector {} at ({}, {}) is not on an unveiled field",
                    sector.name,
                    sector.position.x,
                    sector.position.y
                ),
            }
        }
        Ok(())
    }

    fn load_movables(&self) -> Result<(), ApiError> {
        let listed: Vec<Movable> =
            api::get(&*self.api, &api::collection_url(&*self.api, "movables", Some(1)))?;
        {
            let mut movables = self.movables.borrow_mut();
            movables.clear();
            for movable in listed {
                for ship in &movable.ship_set {
                    match ship.full() {
                        Some(ship) => self.blueprints.require(&ship.blueprint),
                        None => log::debug!(
                            "ship of movable {} not embedded; blueprint not prefetched",
                            movable.url
                        ),
                    }
                }
                movables.entry(movable.position).or_default().push(movable);
            }
        }
        self.blueprints.resolve()
    }

    /// Centers the map on the player's home world, one fetch hop at a time:
    /// user, empire, first habitated celestial, its sector.
    fn center_on_home(&self) -> Result<(), ApiError> {
        let users: Vec<User> =
            api::get(&*self.api, &api::collection_url(&*self.api, "users", None))?;
        let Some(user) = users.into_iter().next() else {
            log::warn!("no logged-in user in the feed; map stays uncentered");
            return Ok(());
        };
        let Some(empire_url) = user.empire.as_deref() else {
            log::warn!("user {} has no empire yet", user.username);
            return Ok(());
        };
        let empire: Empire = api::get(&*self.api, empire_url)?;
        if let Some(home) = empire.habitat.first() {
            let celestial: Celestial = api::get(&*self.api, home)?;
            let sector: Sector = api::get(&*self.api, &celestial.sector)?;
            self.center_on(sector.position);
        }
        self.empire.replace(Some(empire));
        Ok(())
    }

    /// Dispatches a click on field `coord` through the event stack. Clicks
    /// on fields that were never unveiled are ignored.
    pub fn click(&self, coord: HexCoord) {
        let field = {
            let fields = self.fields.borrow();
            match fields.get(&coord) {
                Some(field) => field.clone(),
                None => return,
            }
        };
        self.events.hex_field_click.fire(&HexFieldClick {
            coord: field.coord,
            sector: field.sector_url,
        });
    }

    pub fn center_on(&self, coord: HexCoord) {
        self.center.set(Some(coord));
        self.offset.set(self.layout.center_offset(coord, self.viewport));
    }

    pub fn center(&self) -> Option<HexCoord> {
        self.center.get()
    }

    /// Current map offset in pixels.
    pub fn offset(&self) -> Vec2 {
        self.offset.get()
    }

    pub fn field_at(&self, coord: HexCoord) -> Option<HexField> {
        self.fields.borrow().get(&coord).cloned()
    }

    pub fn field_count(&self) -> usize {
        self.fields.borrow().len()
    }

    pub fn sector_count(&self) -> usize {
        self.fields.borrow().values().filter(|f| f.is_sector()).count()
    }

    /// Movables at the given field, if any.
    pub fn movables_at(&self, coord: HexCoord) -> Vec<Movable> {
        self.movables.borrow().get(&coord).cloned().unwrap_or_default()
    }

    /// The player's empire, as loaded during home-world centering.
    pub fn empire(&self) -> Option<Empire> {
        self.empire.borrow().clone()
    }

    /// The current turn number (0 before the first status fetch).
    pub fn tick(&self) -> u64 {
        self.status.get().map(|s| s.tick()).unwrap_or(0)
    }

    pub fn status(&self) -> Option<TurnStatus> {
        self.status.get()
    }

    /// Fetches the world clock and stores the new turn status.
    pub fn refresh_status(&self) -> Result<WorldStatus, ApiError> {
        let worlds: Vec<WorldStatus> =
            api::get(&*self.api, &api::collection_url(&*self.api, "worlds", None))?;
        let world = worlds
            .into_iter()
            .next()
            .ok_or(ApiError::Missing { what: "world" })?;
        self.status
            .set(Some(TurnStatus::new(world.now, world.remaining_seconds)));
        Ok(world)
    }

    /// Polls the turn clock; when a new turn has begun, reloads the world
    /// state and returns the new tick.
    pub fn sync_turn(&self) -> Result<Option<u64>, ApiError> {
        let previous = self.status.get().map(|s| s.tick());
        let world = self.refresh_status()?;
        match previous {
            Some(tick) if tick != world.now => {
                log::info!("turn {} has begun; reloading the world", world.now);
                self.reload()?;
                Ok(Some(world.now))
            }
            _ => Ok(None),
        }
    }

    /// Drops all loaded state and runs the initial load again.
    pub fn reload(&self) -> Result<(), ApiError> {
        self.fields.borrow_mut().clear();
        self.movables.borrow_mut().clear();
        self.empire.replace(None);
        self.load()
    }
}

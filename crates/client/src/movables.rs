//! Fleet panel: movables at the clicked field, move orders, colonization.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use api::{ApiClient, ApiError, Celestial, Movable};
use hexgrid::HexCoord;
use serde_json::{json, Value};

use crate::blueprints::BlueprintStore;
use crate::world::WorldMap;

/// View model of one ship in a fleet.
#[derive(Debug, Clone)]
pub struct ShipView {
    /// Blueprint display name, or the blueprint URL when unresolved.
    pub name: String,
}

/// View model of one movable in the panel.
#[derive(Debug, Clone)]
pub struct MovableView {
    pub movable: Movable,
    pub ships: Vec<ShipView>,
}

/// Owns the fleet list and the move-order mode. The list handler is pushed
/// after the sector panel's default handler, so fleets update before the
/// sector view on every click.
pub struct MovablesPanel {
    api: Rc<dyn ApiClient>,
    blueprints: Rc<BlueprintStore>,
    views: RefCell<Vec<MovableView>>,
    /// True while a one-shot target-capture handler sits on the stack.
    move_order: Cell<bool>,
}

impl MovablesPanel {
    pub fn new(api: Rc<dyn ApiClient>, blueprints: Rc<BlueprintStore>) -> Rc<Self> {
        Rc::new(Self {
            api,
            blueprints,
            views: RefCell::new(Vec::new()),
            move_order: Cell::new(false),
        })
    }

    /// Registers the fleet-list handler: shows the movables at the clicked
    /// field (or empties the panel), and lets the click fall through.
    pub fn attach(self: &Rc<Self>, world: &Rc<WorldMap>) {
        let panel = Rc::downgrade(self);
        let world_ref = Rc::downgrade(world);
        world.events.hex_field_click.push(move |click| {
            if let (Some(panel), Some(world)) = (panel.upgrade(), world_ref.upgrade()) {
                panel.show_at(&world, click.coord);
            }
            true
        });
    }

    fn show_at(&self, world: &WorldMap, coord: HexCoord) {
        let views = world
            .movables_at(coord)
            .into_iter()
            .map(|movable| self.movable_view(movable))
            .collect();
        self.views.replace(views);
    }

    fn movable_view(&self, movable: Movable) -> MovableView {
        let ships = movable
            .ship_set
            .iter()
            .filter_map(|related| related.full())
            .map(|ship| ShipView {
                name: self
                    .blueprints
                    .get(&ship.blueprint)
                    .map(|blueprint| blueprint.data.name)
                    .unwrap_or_else(|| ship.blueprint.clone()),
            })
            .collect();
        MovableView { movable, ships }
    }

    /// Fleets at the most recently clicked field; empty when the panel is
    /// hidden.
    pub fn views(&self) -> Vec<MovableView> {
        self.views.borrow().clone()
    }

    /// Arms move-order mode: the next map click becomes `movable`'s
    /// destination. The one-shot handler consumes the click: it pops itself
    /// off the stack and vetoes, so no older handler sees it.
    pub fn begin_move_order(self: &Rc<Self>, world: &Rc<WorldMap>, movable: &Movable) {
        if self.move_order.get() {
            log::warn!("a move order is already waiting for its target");
            return;
        }
        self.move_order.set(true);

        let panel = Rc::downgrade(self);
        let events = Rc::downgrade(&world.events);
        let api = Rc::clone(&self.api);
        let movable = movable.clone();
        world.events.hex_field_click.push(move |click| {
            // One-shot: leave the stack first. `pop` removes the tail, which
            // is this handler as long as no mode was armed on top of it.
            if let Some(events) = events.upgrade() {
                events.hex_field_click.pop();
            }
            if let Some(panel) = panel.upgrade() {
                panel.move_order.set(false);
            }
            match send_move_order(&*api, &movable, click.coord) {
                Ok(moved) => {
                    let path = movable.position.trajectory_toward(click.coord, movable.speed);
                    log::info!(
                        "fleet {} under way to ({}, {}), {} turns en route, next stop ({}, {})",
                        movable.url,
                        click.coord.x,
                        click.coord.y,
                        path.len(),
                        moved.next_position.x,
                        moved.next_position.y
                    );
                }
                Err(e) => log::warn!("move order failed: {}", e),
            }
            false
        });
    }

    /// Disarms move-order mode without consuming a click.
    pub fn cancel_move_order(&self, world: &WorldMap) {
        if !self.move_order.get() {
            return;
        }
        world.events.hex_field_click.pop();
        self.move_order.set(false);
    }

    pub fn move_order_pending(&self) -> bool {
        self.move_order.get()
    }

    /// Orders `movable` to colonize `celestial`.
    pub fn colonize(&self, movable: &Movable, celestial: &Celestial) -> Result<(), ApiError> {
        let body = json!({ "movable": movable.url });
        let _: Value = api::post(&*self.api, &api::action_url(&celestial.url, "colonize"), &body)?;
        log::info!("colonization of {} started", celestial.url);
        Ok(())
    }
}

fn send_move_order(
    api: &dyn ApiClient,
    movable: &Movable,
    target: HexCoord,
) -> Result<Movable, ApiError> {
    let body = json!({ "x": target.x, "y": target.y });
    api::post(api, &api::action_url(&movable.url, "move_to"), &body)
}

//! Construction menu: build options from the empire's blueprints, progress
//! of the running build process.

use std::cell::RefCell;
use std::rc::Rc;

use api::{ApiClient, ApiError, Celestial, Process, Sector};
use serde_json::{json, Value};

use crate::blueprints::BlueprintStore;
use crate::sector::celestial_name;
use crate::world::WorldMap;

#[derive(Debug, Clone)]
pub struct BuildOption {
    pub url: String,
    pub name: String,
    pub cost: Option<u64>,
}

/// The running build process, as shown in the menu.
#[derive(Debug, Clone)]
pub struct BuildProcessView {
    /// Blueprint display name, when the process payload names it.
    pub name: Option<String>,
    pub celestial: Option<String>,
    pub progress_percent: u32,
    /// `1 turn` / `n turns`.
    pub remaining: String,
}

#[derive(Debug, Clone)]
pub struct BuildView {
    pub sector_name: String,
    pub celestial_name: String,
    pub celestial_url: String,
    pub options: Vec<BuildOption>,
    pub process: Option<BuildProcessView>,
}

pub struct BuildMenu {
    api: Rc<dyn ApiClient>,
    blueprints: Rc<BlueprintStore>,
    view: RefCell<Option<BuildView>>,
}

impl BuildMenu {
    pub fn new(api: Rc<dyn ApiClient>, blueprints: Rc<BlueprintStore>) -> Rc<Self> {
        Rc::new(Self {
            api,
            blueprints,
            view: RefCell::new(None),
        })
    }

    /// Opens the menu for a celestial of `sector`: one build option per
    /// blueprint of the player's empire, plus the sector's running process.
    pub fn open(
        &self,
        world: &WorldMap,
        sector: &Sector,
        celestial: &Celestial,
    ) -> Result<(), ApiError> {
        let empire = world.empire().ok_or(ApiError::Missing { what: "empire" })?;
        for url in &empire.blueprint_set {
            self.blueprints.require(url);
        }
        self.blueprints.resolve()?;

        let options = empire
            .blueprint_set
            .iter()
            .filter_map(|url| self.blueprints.get(url))
            .map(|blueprint| BuildOption {
                url: blueprint.url.clone(),
                name: blueprint.data.name.clone(),
                cost: blueprint.data.cost,
            })
            .collect();

        let process = match &sector.process {
            Some(url) => {
                let process: Process = api::get(&*self.api, url)?;
                Some(self.process_view(world, &process))
            }
            None => None,
        };

        self.view.replace(Some(BuildView {
            sector_name: sector.name.clone(),
            celestial_name: celestial_name(sector, celestial),
            celestial_url: celestial.url.clone(),
            options,
            process,
        }));
        Ok(())
    }

    fn process_view(&self, world: &WorldMap, process: &Process) -> BuildProcessView {
        let tick = world.tick();
        let name = process
            .data
            .get("blueprint_url")
            .and_then(Value::as_str)
            .and_then(|url| self.blueprints.get(url))
            .map(|blueprint| blueprint.data.name);
        let celestial = process
            .data
            .get("celestial_url")
            .and_then(Value::as_str)
            .map(str::to_owned);
        BuildProcessView {
            name,
            celestial,
            progress_percent: process.progress_percent(tick),
            remaining: format_turns(process.remaining_turns(tick)),
        }
    }

    /// Posts the build order; the returned process becomes the menu's
    /// current one.
    pub fn build(
        &self,
        world: &WorldMap,
        blueprint_url: &str,
        celestial_url: &str,
    ) -> Result<Process, ApiError> {
        let body = json!({ "celestial": celestial_url });
        let process: Process =
            api::post(&*self.api, &api::action_url(blueprint_url, "build"), &body)?;
        let process_view = self.process_view(world, &process);
        if let Some(view) = self.view.borrow_mut().as_mut() {
            view.process = Some(process_view);
        }
        Ok(process)
    }

    pub fn close(&self) {
        self.view.replace(None);
    }

    pub fn view(&self) -> Option<BuildView> {
        self.view.borrow().clone()
    }
}

fn format_turns(turns: u64) -> String {
    if turns == 1 {
        "1 turn".to_string()
    } else {
        format!("{} turns", turns)
    }
}

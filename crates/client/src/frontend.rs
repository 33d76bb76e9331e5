//! Text front end: renders the panels and the map as lines, drives the app
//! from stdin. Rendering is a collaborator of the UI modules, not part of
//! them; everything here reads view models and calls the same module
//! surface the click handlers use.

use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use anyhow::Result;

use api::Related;
use hexgrid::{DistanceSet, HexCoord};

use crate::app::App;
use crate::config::ClientConfig;
use crate::world::WorldMap;

pub fn run(app: App, config: &ClientConfig) -> Result<()> {
    println!(
        "Starhold: {} fields, {} sectors loaded from {}",
        app.world.field_count(),
        app.world.sector_count(),
        config.api_url
    );
    if let Some(status) = app.world.status() {
        println!("turn {}, next in {}", status.tick(), status.remaining_label());
    }
    print_help();

    let poll_interval = Duration::from_secs(config.poll_interval_secs);
    let mut last_poll = Instant::now();
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        // Poll the turn clock between commands; a new turn reloads the world.
        if last_poll.elapsed() >= poll_interval {
            last_poll = Instant::now();
            match app.world.sync_turn() {
                Ok(Some(tick)) => println!("turn {} has begun", tick),
                Ok(None) => {}
                Err(e) => log::warn!("status poll failed: {}", e),
            }
        }

        print!("> ");
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if !dispatch(&app, line.trim()) {
            break;
        }
    }
    Ok(())
}

fn print_help() {
    println!("commands:");
    println!("  map [radius]      draw the area around the map center");
    println!("  click <x> <y>     click a hex field");
    println!("  center <x> <y>    center the map");
    println!("  sector            show the sector panel");
    println!("  fleet             show the fleet panel");
    println!("  move <fleet#>     arm a move order (next click is the target)");
    println!("  cancel            disarm the pending move order");
    println!("  buildmenu <cel#>  open the build menu for a celestial");
    println!("  build <option#>   order the selected build option");
    println!("  close             close the build menu");
    println!("  colonize <fleet#> <cel#>  colonize a celestial");
    println!("  status            refresh the turn clock");
    println!("  quit");
}

/// Returns false when the session should end.
fn dispatch(app: &App, line: &str) -> bool {
    let mut parts = line.split_whitespace();
    match parts.next() {
        None => {}
        Some("quit") | Some("exit") => return false,
        Some("help") => print_help(),
        Some("map") => {
            let radius = parts.next().and_then(|s| s.parse().ok()).unwrap_or(5);
            print!("{}", render_map(&app.world, radius));
        }
        Some("status") => match app.world.refresh_status() {
            Ok(_) => {
                if let Some(status) = app.world.status() {
                    println!("turn {}, next in {}", status.tick(), status.remaining_label());
                }
            }
            Err(e) => println!("status refresh failed: {}", e),
        },
        Some("click") => match parse_coord(parts.next(), parts.next()) {
            Some(coord) => {
                app.world.click(coord);
                print_sector(app);
                print_fleet(app);
            }
            None => println!("usage: click <x> <y>  (x + y must be even)"),
        },
        Some("center") => match parse_coord(parts.next(), parts.next()) {
            Some(coord) => {
                app.world.center_on(coord);
                let offset = app.world.offset();
                println!("map offset now ({:.0}, {:.0}) px", offset.x, offset.y);
                print!("{}", render_map(&app.world, 5));
            }
            None => println!("usage: center <x> <y>  (x + y must be even)"),
        },
        Some("sector") => print_sector(app),
        Some("fleet") => print_fleet(app),
        Some("move") => match indexed(parts.next(), app.movables.views().len()) {
            Some(_) if app.movables.move_order_pending() => {
                println!("a move order is already armed (use 'cancel' first)");
            }
            Some(index) => {
                let fleet = app.movables.views()[index].movable.clone();
                app.movables.begin_move_order(&app.world, &fleet);
                println!("move order armed: click the target field");
            }
            None => println!("usage: move <fleet#>  (see 'fleet')"),
        },
        Some("cancel") => {
            app.movables.cancel_move_order(&app.world);
            println!("move order disarmed");
        }
        Some("buildmenu") => buildmenu_command(app, parts.next()),
        Some("build") => build_command(app, parts.next()),
        Some("close") => {
            app.build.close();
            println!("build menu closed");
        }
        Some("colonize") => colonize_command(app, parts.next(), parts.next()),
        Some(other) => println!("unknown command: {} (try 'help')", other),
    }
    true
}

fn parse_coord(x: Option<&str>, y: Option<&str>) -> Option<HexCoord> {
    let x = x?.parse().ok()?;
    let y = y?.parse().ok()?;
    HexCoord::try_new(x, y)
}

/// 1-based command index into a list of the given length.
fn indexed(arg: Option<&str>, len: usize) -> Option<usize> {
    let index: usize = arg?.parse().ok()?;
    (1..=len).contains(&index).then(|| index - 1)
}

fn buildmenu_command(app: &App, arg: Option<&str>) {
    let Some(sector) = app.sector.current() else {
        println!("click a sector first");
        return;
    };
    let celestials: Vec<_> = sector
        .celestial_set
        .iter()
        .filter_map(Related::full)
        .collect();
    let Some(index) = indexed(arg, celestials.len()) else {
        println!("usage: buildmenu <cel#>  (see 'sector')");
        return;
    };
    match app.build.open(&app.world, &sector, celestials[index]) {
        Ok(()) => print_build(app),
        Err(e) => println!("build menu failed: {}", e),
    }
}

fn build_command(app: &App, arg: Option<&str>) {
    let Some(view) = app.build.view() else {
        println!("open the build menu first");
        return;
    };
    let Some(index) = indexed(arg, view.options.len()) else {
        println!("usage: build <option#>  (see 'buildmenu')");
        return;
    };
    let option = &view.options[index];
    match app.build.build(&app.world, &option.url, &view.celestial_url) {
        Ok(_) => {
            println!("{} under construction on {}", option.name, view.celestial_name);
            print_build(app);
        }
        Err(e) => println!("build order failed: {}", e),
    }
}

fn colonize_command(app: &App, fleet: Option<&str>, celestial: Option<&str>) {
    let fleets = app.movables.views();
    let Some(sector) = app.sector.current() else {
        println!("click a sector first");
        return;
    };
    let celestials: Vec<_> = sector
        .celestial_set
        .iter()
        .filter_map(Related::full)
        .collect();
    let (Some(fleet_index), Some(cel_index)) = (
        indexed(fleet, fleets.len()),
        indexed(celestial, celestials.len()),
    ) else {
        println!("usage: colonize <fleet#> <cel#>");
        return;
    };
    match app
        .movables
        .colonize(&fleets[fleet_index].movable, celestials[cel_index])
    {
        Ok(()) => println!("colonization order issued"),
        Err(e) => println!("colonization failed: {}", e),
    }
}

fn print_sector(app: &App) {
    match app.sector.view() {
        Some(view) => {
            println!("sector {}", view.name);
            for (index, celestial) in view.celestials.iter().enumerate() {
                let habitated = if celestial.habitated { ", habitated" } else { "" };
                println!("  [{}] {} ({:?}{})", index + 1, celestial.name, celestial.kind, habitated);
                for (key, value) in &celestial.features {
                    println!("      {}: {}", key, value);
                }
            }
        }
        None => println!("(no sector selected)"),
    }
}

fn print_fleet(app: &App) {
    let views = app.movables.views();
    if views.is_empty() {
        println!("(no fleet at this field)");
        return;
    }
    for (index, view) in views.iter().enumerate() {
        let movable = &view.movable;
        let heading = if movable.is_moving() {
            format!(
                " -> ({}, {}), next stop ({}, {})",
                movable.destination.x,
                movable.destination.y,
                movable.next_position.x,
                movable.next_position.y
            )
        } else {
            String::new()
        };
        println!(
            "  [{}] fleet at ({}, {}){}",
            index + 1,
            movable.position.x,
            movable.position.y,
            heading
        );
        for ship in &view.ships {
            println!("      {}", ship.name);
        }
    }
}

fn print_build(app: &App) {
    let Some(view) = app.build.view() else {
        return;
    };
    println!("build menu: {} / {}", view.sector_name, view.celestial_name);
    match &view.process {
        Some(process) => {
            let name = process.name.as_deref().unwrap_or("(unknown)");
            let site = process
                .celestial
                .as_deref()
                .map(|url| format!(" on {}", url))
                .unwrap_or_default();
            println!(
                "  in progress: {}{} ({}%, {} remaining)",
                name, site, process.progress_percent, process.remaining
            );
        }
        None => println!("  no build process running"),
    }
    for (index, option) in view.options.iter().enumerate() {
        match option.cost {
            Some(cost) => println!("  [{}] {} (cost {})", index + 1, option.name, cost),
            None => println!("  [{}] {}", index + 1, option.name),
        }
    }
}

/// Character map of the area around the map center: `*` sector, `@` fleet,
/// `o` unveiled field, `.` veiled field.
pub fn render_map(world: &WorldMap, radius: i32) -> String {
    let Some(center) = world.center() else {
        return String::from("(map not centered yet)\n");
    };
    let area = DistanceSet::new(center, radius);
    let (x_min, x_max, y_min, y_max) = area.bbox();
    let mut out = String::new();
    for y in y_min..=y_max {
        let mut row = String::new();
        for x in x_min..=x_max {
            let symbol = match HexCoord::try_new(x, y) {
                Some(coord) if area.contains(coord) => symbol_for(world, coord),
                _ => ' ',
            };
            row.push(symbol);
        }
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out
}

fn symbol_for(world: &WorldMap, coord: HexCoord) -> char {
    if !world.movables_at(coord).is_empty() {
        '@'
    } else {
        match world.field_at(coord) {
            Some(field) if field.is_sector() => '*',
            Some(_) => 'o',
            None => '.',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::config::ClientConfig;
    use crate::testutil::{seed_world, StubApi};
    use std::rc::Rc;

    #[test]
    fn map_marks_sectors_fleets_and_veiled_fields() {
        let stub = StubApi::new();
        seed_world(&stub);
        let app = App::new(Rc::clone(&stub) as Rc<dyn api::ApiClient>, &ClientConfig::default())
            .unwrap();

        let map = render_map(&app.world, 1);
        let rows: Vec<&str> = map.lines().collect();
        // Radius 1 around the home sector at the origin: three rows.
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].trim(), ". * o"); // veiled, home sector, unveiled
        assert!(rows[2].contains('@')); // the fleet at (1, 1)
    }

    #[test]
    fn command_indices_are_one_based_and_bounded() {
        assert_eq!(indexed(Some("1"), 3), Some(0));
        assert_eq!(indexed(Some("3"), 3), Some(2));
        assert_eq!(indexed(Some("0"), 3), None);
        assert_eq!(indexed(Some("4"), 3), None);
        assert_eq!(indexed(Some("x"), 3), None);
        assert_eq!(indexed(None, 3), None);
    }
}

//! Portal linkage across whole generated worlds
//!
//! Every generated portal is one half of a reciprocal pair: stepping through
//! it and then through the portal at the landing cell returns the player to
//! where they started.

use sludge::area::AreaKind;
use sludge::{Position, TransitOutcome, World, WorldConfig};

fn worlds() -> impl Iterator<Item = World> {
    [123u64, 7, 4096, 99_999].into_iter().map(|seed| {
        World::from_config(WorldConfig {
            seed,
            ..WorldConfig::default()
        })
        .unwrap()
    })
}

#[test]
fn test_every_portal_has_a_way_back() {
    for world in worlds() {
        let links = world.portal_links();
        assert!(!links.is_empty());

        for (origin, destination) in links {
            assert!(world.area(destination.area).contains(destination.cell));
            assert_eq!(
                world.portal_destination(destination),
                Some(origin),
                "no way back from {:?} to {:?}",
                destination,
                origin
            );
        }
    }
}

#[test]
fn test_root_portals_land_on_starting_cells() {
    for world in worlds() {
        let root = world.root();
        for (cell, portal) in world.area(root).portals() {
            assert!(portal.target_cell.is_none(), "root cell {} names a target cell", cell);
            let target = world.area(portal.target_area);
            assert!(matches!(target.kind(), AreaKind::Cave | AreaKind::Settlement));
        }
    }
}

#[test]
fn test_walking_a_portal_there_and_back() {
    let world = World::from_config(WorldConfig::default()).unwrap();
    let (origin, destination) = world.portal_links()[0];

    let mut player = world.spawn_player("Joan");
    player.position = origin;

    let there = world.enter_portal(&mut player);
    assert_eq!(
        there,
        TransitOutcome::Entered {
            from: origin,
            to: destination
        }
    );
    assert_eq!(player.position, destination);

    let back = world.enter_portal(&mut player);
    assert_eq!(
        back,
        TransitOutcome::Entered {
            from: destination,
            to: origin
        }
    );
    assert_eq!(player.position, origin);
}

#[test]
fn test_building_doors_name_their_plot() {
    let world = World::from_config(WorldConfig::default()).unwrap();
    for (id, area) in world.registry().iter() {
        if area.kind() != AreaKind::Building {
            continue;
        }
        let door = area.portal_at(0).expect("building door");
        let plot = Position::new(door.target_area, door.target_cell.expect("plot cell"));
        assert_eq!(world.area(plot.area).kind(), AreaKind::Settlement);
        assert_eq!(world.portal_destination(plot), Some(Position::new(id, 0)));
    }
}

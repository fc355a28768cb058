//! The seeded solar system catalog.
//!
//! Sizes, orbit radii, and speeds are scene values tuned for legibility, not
//! to scale: planets orbit in seconds, not years. Orbital speeds decrease
//! outward and rotation speeds roughly follow the real ordering (gas giants
//! spin fastest, Venus barely at all).

use crate::body::{Body, BodyKind, Satellite};
use crate::orbit::Orbit;
use crate::SolarSystem;

/// Build the Sun, the eight planets, their major moons, and a handful of
/// named spacecraft.
#[must_use]
pub fn sol() -> SolarSystem {
    let mut system = SolarSystem::new();

    let sun = system.add_body(Body::fixed("Sun", BodyKind::Star, 16.0, 0.02));

    // Planets: (name, radius, orbit radius, orbit speed rad/s, spin rad/s, phase)
    let planets = [
        ("Mercury", 3.0, 80.0, 0.66, 0.012, 0.0),
        ("Venus", 5.0, 110.0, 0.60, 0.006, 0.9),
        ("Earth", 5.0, 140.0, 0.54, 0.030, 1.8),
        ("Mars", 5.0, 170.0, 0.48, 0.027, 2.7),
        ("Jupiter", 15.0, 210.0, 0.42, 0.120, 3.6),
        ("Saturn", 14.0, 300.0, 0.36, 0.114, 4.5),
        ("Uranus", 10.0, 340.0, 0.30, 0.087, 5.4),
        ("Neptune", 10.0, 370.0, 0.24, 0.096, 0.4),
    ];

    let mut ids = std::collections::HashMap::new();
    for (name, radius, orbit_radius, orbit_speed, spin, phase) in planets {
        let id = system.add_body(Body::orbiting(
            name,
            BodyKind::Planet,
            radius,
            Orbit::with_phase(sun, orbit_radius, orbit_speed, phase),
            spin,
        ));
        ids.insert(name, id);
    }

    // Moons: (name, parent, radius, orbit radius, orbit speed rad/s)
    let moons = [
        ("Moon", "Earth", 1.2, 12.0, 0.072),
        ("Phobos", "Mars", 0.3, 4.0, 0.120),
        ("Deimos", "Mars", 0.2, 6.0, 0.090),
        ("Io", "Jupiter", 1.8, 25.0, 0.180),
        ("Europa", "Jupiter", 1.6, 29.0, 0.150),
        ("Ganymede", "Jupiter", 2.2, 33.0, 0.120),
        ("Callisto", "Jupiter", 2.0, 38.0, 0.090),
        ("Titan", "Saturn", 2.5, 30.0, 0.108),
        ("Enceladus", "Saturn", 1.0, 24.0, 0.144),
        ("Titania", "Uranus", 0.8, 16.0, 0.120),
        ("Triton", "Neptune", 1.8, 16.0, 0.108),
    ];

    for (name, parent, radius, orbit_radius, orbit_speed) in moons {
        // Moons are tidally locked in spirit: negligible spin.
        system.add_body(Body::orbiting(
            name,
            BodyKind::Moon,
            radius,
            Orbit::circular(ids[parent], orbit_radius, orbit_speed),
            0.006,
        ));
    }

    // Spacecraft: (name, parent, orbit radius, orbit speed rad/s)
    let spacecraft = [
        ("International Space Station (ISS)", "Earth", 15.0, 0.30),
        ("Hubble Space Telescope", "Earth", 16.0, 0.24),
        ("GPS Constellation", "Earth", 18.0, 0.18),
        ("Starlink Constellation", "Earth", 14.0, 0.36),
        ("Mars Reconnaissance Orbiter", "Mars", 5.0, 0.27),
        ("MAVEN", "Mars", 6.0, 0.21),
        ("Juno", "Jupiter", 26.0, 0.15),
        ("Cassini", "Saturn", 36.0, 0.12),
    ];

    for (name, parent, orbit_radius, orbit_speed) in spacecraft {
        system.add_satellite(Satellite::new(
            name,
            Orbit::circular(ids[parent], orbit_radius, orbit_speed),
        ));
    }

    system
}

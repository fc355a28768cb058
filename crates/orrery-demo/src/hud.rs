//! Compact one-line HUD readout of the walking player, for the log stream.

use orrery_walk::PlayerSnapshot;

/// Format a player snapshot as a compact single line.
///
/// Example: `BODY: Earth | POS: (142.1, 3.8, -1.2) | SPD: 5.0 | GROUNDED`
pub fn format_snapshot(snapshot: &PlayerSnapshot) -> String {
    let p = snapshot.position;
    let grounded = if snapshot.grounded { "GROUNDED" } else { "AIRBORNE" };
    format!(
        "BODY: {} | POS: ({:.1}, {:.1}, {:.1}) | SPD: {:.1} | {}",
        snapshot.body_name,
        p.x,
        p.y,
        p.z,
        snapshot.velocity.length(),
        grounded,
    )
}

//! Places a pentagon of anchors on a simulated floor, builds the polygon and
//! pans its material.
//!
//! ```text
//! cargo run --example place_and_build
//! RUST_LOG=armesh=debug cargo run --example place_and_build
//! ```

use armesh::anchor::{HitPose, PlaneId};
use armesh::error::AnchorError;
use armesh::math::{Point2, Point3, Vector3};
use armesh::mesh::MaterialId;
use armesh::session::{InMemoryTracker, PlacementSession};
use armesh::ArMeshError;

/// Screen coordinates map straight onto the floor plane `y = 0`.
fn floor(screen: Point2) -> Option<HitPose> {
    Some(HitPose {
        position: Point3::new(screen.x, 0.0, screen.y),
        plane: PlaneId(1),
    })
}

fn main() -> armesh::Result<()> {
    // Default: WARN for everything, INFO for armesh.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("armesh=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut session =
        PlacementSession::new(floor, InMemoryTracker::new()).with_material(MaterialId(1));

    // Clockwise seen from above, so the fan comes out upside down and is flipped.
    let taps = [(0.0, 0.0), (-0.5, 1.5), (1.0, 2.5), (2.5, 1.5), (2.0, 0.0)];
    for (x, y) in taps {
        session.on_tap_at(Point2::new(x, y));
        let placement = session.place_anchor()?;
        tracing::info!(count = placement.count, can_finish = placement.can_finish, "anchor placed");
    }
    // A sixth anchor is rejected; the session also logs the error.
    match session.place_anchor() {
        Err(ArMeshError::Anchor(AnchorError::CapacityExceeded { capacity })) => {
            println!("sixth anchor rejected: capacity is {capacity}");
        }
        Err(e) => return Err(e),
        Ok(placement) => println!("unexpected placement #{}", placement.count),
    }

    let mesh = session.finish(Vector3::y())?;
    tracing::info!(
        vertices = mesh.vertices().len(),
        triangles = mesh.triangles().len(),
        winding = ?mesh.winding(),
        "polygon built"
    );
    for (v, uv) in mesh.vertices().iter().zip(mesh.uvs()) {
        println!("({:6.2}, {:6.2}, {:6.2})  uv ({:.3}, {:.3})", v.x, v.y, v.z, uv.x, uv.y);
    }

    session.pan_material(0.25)?;
    if let Some(mesh) = session.mesh() {
        println!("after pan: first boundary uv = {:?}", mesh.uvs()[1]);
    }

    session.restart();
    tracing::info!(anchors = session.anchors().count(), "session restarted");
    Ok(())
}

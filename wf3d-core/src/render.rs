//! Wireframe drawing of polygons and entities onto a [`Surface`].
use crate::camera::Camera;
use crate::entity::{Entity, LineStyle};
use crate::geometry::Polygon;
use crate::projection::Viewport;
use crate::surface::Surface;
use crate::transform::Pose;

/// Stroke the closed outline of one polygon: N segments for N vertices.
pub fn draw_polygon<S: Surface + ?Sized>(
    surface: &mut S,
    polygon: &Polygon,
    pose: &Pose,
    style: &LineStyle,
    camera: &Camera,
    viewport: &Viewport,
) {
    for (from, to) in polygon.edges() {
        surface.draw_line(
            viewport.project_vertex(from, pose, camera),
            viewport.project_vertex(to, pose, camera),
            style.color,
            style.width,
        );
    }
}

/// Draw every polygon of every mesh, in mesh order then polygon order.
pub fn draw_entity<S: Surface + ?Sized>(
    surface: &mut S,
    entity: &Entity,
    camera: &Camera,
    viewport: &Viewport,
) {
    for mesh in entity.meshes() {
        for polygon in &mesh.polygons {
            draw_polygon(surface, polygon, &entity.pose, &entity.style, camera, viewport);
        }
    }
}

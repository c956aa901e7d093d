//! Mesh data of one calendar sheet.
//!
//! A sheet is a thin box split into three faces so each can carry its own
//! material: the front image, the back image and the paper edges. Every face
//! keeps an immutable rest snapshot (flat box plus static curl) and a live
//! buffer that the flip animation bends.

use crate::config::LayoutSettings;
use crate::curvature::apply_curvature;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceKind {
    Front,
    Back,
    Edge,
}

impl FaceKind {
    pub const ALL: [FaceKind; 3] = [FaceKind::Front, FaceKind::Back, FaceKind::Edge];
}

#[derive(Debug, Clone)]
pub struct FaceGeometry {
    kind: FaceKind,
    rest: Vec<[f32; 3]>,
    live: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    indices: Vec<u32>,
}

impl FaceGeometry {
    pub fn kind(&self) -> FaceKind {
        self.kind
    }

    /// Positions at rest. Never modified after construction.
    pub fn rest(&self) -> &[[f32; 3]] {
        &self.rest
    }

    /// Current positions, including the flip bend.
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.live
    }

    pub fn uvs(&self) -> &[[f32; 2]] {
        &self.uvs
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.rest.len()
    }
}

/// Accumulates grid planes into one vertex/index buffer.
#[derive(Default)]
struct PlaneBuffer {
    positions: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    indices: Vec<u32>,
}

/// One axis-aligned grid plane of a box.
///
/// `u`/`v` index the in-plane axes, `w` the normal axis; `depth` is signed and
/// places the plane at `w = depth / 2`. Triangles wind counter-clockwise as
/// seen from the side the plane faces.
struct Plane {
    u: usize,
    v: usize,
    w: usize,
    u_dir: f32,
    v_dir: f32,
    width: f32,
    height: f32,
    depth: f32,
    grid_x: u32,
    grid_y: u32,
}

impl Plane {
    fn new(
        (u, v, w): (usize, usize, usize),
        (u_dir, v_dir): (f32, f32),
        (width, height, depth): (f32, f32, f32),
        (grid_x, grid_y): (u32, u32),
    ) -> Self {
        Self { u, v, w, u_dir, v_dir, width, height, depth, grid_x, grid_y }
    }
}

impl PlaneBuffer {
    fn push(&mut self, plane: Plane) {
        let base = self.positions.len() as u32;
        let seg_w = plane.width / plane.grid_x as f32;
        let seg_h = plane.height / plane.grid_y as f32;
        let (half_w, half_h, half_d) = (plane.width / 2.0, plane.height / 2.0, plane.depth / 2.0);

        for iy in 0..=plane.grid_y {
            let y = iy as f32 * seg_h - half_h;
            for ix in 0..=plane.grid_x {
                let x = ix as f32 * seg_w - half_w;
                let mut vertex = [0.0; 3];
                vertex[plane.u] = x * plane.u_dir;
                vertex[plane.v] = y * plane.v_dir;
                vertex[plane.w] = half_d;
                self.positions.push(vertex);
                self.uvs.push([
                    ix as f32 / plane.grid_x as f32,
                    iy as f32 / plane.grid_y as f32,
                ]);
            }
        }

        let row = plane.grid_x + 1;
        for iy in 0..plane.grid_y {
            for ix in 0..plane.grid_x {
                let a = base + ix + row * iy;
                let b = base + ix + row * (iy + 1);
                let c = base + ix + 1 + row * (iy + 1);
                let d = base + ix + 1 + row * iy;
                self.indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
    }

    fn into_face(self, kind: FaceKind) -> FaceGeometry {
        FaceGeometry {
            kind,
            live: self.positions.clone(),
            rest: self.positions,
            uvs: self.uvs,
            indices: self.indices,
        }
    }
}

const X: usize = 0;
const Y: usize = 1;
const Z: usize = 2;

#[derive(Debug, Clone)]
pub struct PageGeometry {
    half_height: f32,
    bend: f32,
    faces: Vec<FaceGeometry>,
}

impl PageGeometry {
    /// Builds a curled sheet centred on the origin.
    ///
    /// The front faces +Z. The back face UVs run mirrored so its image reads
    /// the right way round from behind.
    pub fn sheet(layout: &LayoutSettings, static_bend: f32) -> Self {
        let (w, h, t) = (layout.page_width, layout.page_height, layout.page_thickness);
        let (gx, gy) = (layout.width_segments, layout.height_segments);

        let mut front = PlaneBuffer::default();
        front.push(Plane::new((X, Y, Z), (1.0, -1.0), (w, h, t), (gx, gy)));

        let mut back = PlaneBuffer::default();
        back.push(Plane::new((X, Y, Z), (-1.0, -1.0), (w, h, -t), (gx, gy)));

        let mut edge = PlaneBuffer::default();
        // right, left
        edge.push(Plane::new((Z, Y, X), (-1.0, -1.0), (t, h, w), (1, gy)));
        edge.push(Plane::new((Z, Y, X), (1.0, -1.0), (t, h, -w), (1, gy)));
        // top, bottom
        edge.push(Plane::new((X, Z, Y), (1.0, 1.0), (w, t, h), (gx, 1)));
        edge.push(Plane::new((X, Z, Y), (1.0, -1.0), (w, t, -h), (gx, 1)));

        let half_height = h / 2.0;
        let faces = [
            front.into_face(FaceKind::Front),
            back.into_face(FaceKind::Back),
            edge.into_face(FaceKind::Edge),
        ]
        .into_iter()
        .map(|mut face| {
            let flat = std::mem::take(&mut face.rest);
            apply_curvature(&flat, &mut face.live, half_height, static_bend);
            face.rest = face.live.clone();
            face
        })
        .collect();

        Self {
            half_height,
            bend: 0.0,
            faces,
        }
    }

    pub fn half_height(&self) -> f32 {
        self.half_height
    }

    /// Bend currently applied on top of the rest shape.
    pub fn bend(&self) -> f32 {
        self.bend
    }

    pub fn faces(&self) -> &[FaceGeometry] {
        &self.faces
    }

    pub fn face(&self, kind: FaceKind) -> Option<&FaceGeometry> {
        self.faces.iter().find(|face| face.kind == kind)
    }

    /// Recomputes every live buffer as rest plus `amount` of curl.
    ///
    /// `set_bend(0.0)` restores the rest shape exactly.
    pub fn set_bend(&mut self, amount: f32) {
        self.bend = amount;
        let half_height = self.half_height;
        for face in &mut self.faces {
            apply_curvature(&face.rest, &mut face.live, half_height, amount);
        }
    }
}

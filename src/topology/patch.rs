//! Boundary patches and the patch export predicate.
//!
//! A [`Patch`] is a named, typed subset of the mesh boundary. Its point list
//! is the ordered set of distinct mesh points referenced by its faces, in order
//! of first appearance, unless the mesh supplies an explicit ordering.
//!
//! [`PatchFilter`] is the only place that decides whether a patch is exported.
//! Point collection, face emission, field aggregation and boundary-condition
//! emission all go through [`PatchFilter::includes`], so the coordinate count
//! and every emitted index list stay consistent.

use crate::topology::periodic::PeriodicTransform;
use std::collections::BTreeSet;

/// Patch type tag of degenerate (2D-simulation) boundaries. Never exported.
pub const EMPTY_PATCH_TYPE: &str = "empty";
/// Patch type tag of cyclic (periodic) boundaries.
pub const CYCLIC_PATCH_TYPE: &str = "cyclic";

/// A named boundary patch.
#[derive(Clone, Debug, PartialEq)]
pub struct Patch {
    name: String,
    patch_type: String,
    physical_type: String,
    faces: Vec<Vec<usize>>,
    mesh_points: Vec<usize>,
    coupled: bool,
    coupled_points: Vec<(usize, usize)>,
    transform: Option<PeriodicTransform>,
}

impl Patch {
    /// Create a patch from its faces; the point list is derived from the faces.
    pub fn new(
        name: impl Into<String>,
        patch_type: impl Into<String>,
        faces: Vec<Vec<usize>>,
    ) -> Self {
        let mesh_points = first_appearance_points(&faces);
        Self {
            name: name.into(),
            patch_type: patch_type.into(),
            physical_type: String::new(),
            faces,
            mesh_points,
            coupled: false,
            coupled_points: Vec::new(),
            transform: None,
        }
    }

    /// Create a coupled cyclic patch.
    ///
    /// `coupled_points` holds one `(start, end)` pair per correspondence, both
    /// entries being indices into the patch point list: `start` lies on the
    /// reference half and `end` on the periodic half.
    pub fn cyclic(
        name: impl Into<String>,
        faces: Vec<Vec<usize>>,
        coupled_points: Vec<(usize, usize)>,
    ) -> Self {
        let mut patch = Self::new(name, CYCLIC_PATCH_TYPE, faces);
        patch.coupled = true;
        patch.coupled_points = coupled_points;
        patch
    }

    /// Set the free-form physical type tag.
    pub fn with_physical_type(mut self, physical_type: impl Into<String>) -> Self {
        self.physical_type = physical_type.into();
        self
    }

    /// Replace the derived point list with the mesh's own ordering.
    pub fn with_mesh_points(mut self, mesh_points: Vec<usize>) -> Self {
        self.mesh_points = mesh_points;
        self
    }

    /// Attach the rigid transform relating the two halves of a cyclic patch.
    pub fn with_transform(mut self, transform: PeriodicTransform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Patch type tag (`wall`, `patch`, `empty`, `cyclic`, ...).
    pub fn patch_type(&self) -> &str {
        &self.patch_type
    }

    /// Physical type tag; may be empty.
    pub fn physical_type(&self) -> &str {
        &self.physical_type
    }

    /// Tag used to choose the CGNS boundary-condition type: the physical type
    /// when one is set, the patch type otherwise.
    pub fn bc_type_tag(&self) -> &str {
        if self.physical_type.is_empty() {
            &self.patch_type
        } else {
            &self.physical_type
        }
    }

    pub fn faces(&self) -> &[Vec<usize>] {
        &self.faces
    }

    pub fn n_faces(&self) -> usize {
        self.faces.len()
    }

    /// Ordered distinct mesh points of the patch.
    pub fn mesh_points(&self) -> &[usize] {
        &self.mesh_points
    }

    pub fn n_points(&self) -> usize {
        self.mesh_points.len()
    }

    pub fn is_coupled(&self) -> bool {
        self.coupled
    }

    /// Correspondence list of a cyclic patch (local point indices).
    pub fn coupled_points(&self) -> &[(usize, usize)] {
        &self.coupled_points
    }

    pub fn transform(&self) -> Option<&PeriodicTransform> {
        self.transform.as_ref()
    }

    pub fn is_empty_type(&self) -> bool {
        self.patch_type == EMPTY_PATCH_TYPE
    }

    pub fn is_cyclic(&self) -> bool {
        self.patch_type == CYCLIC_PATCH_TYPE
    }
}

fn first_appearance_points(faces: &[Vec<usize>]) -> Vec<usize> {
    let mut seen = hashbrown::HashSet::new();
    let mut points = Vec::new();
    for &p in faces.iter().flatten() {
        if seen.insert(p) {
            points.push(p);
        }
    }
    points
}

/// Export predicate shared by every pipeline stage.
///
/// A patch is included unless its type is `empty`, its name is excluded, or
/// an allow-list is set and does not contain the name.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PatchFilter {
    allow: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    exclude: BTreeSet<String>,
}

impl PatchFilter {
    /// Filter that only rejects `empty` patches.
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter restricted to the given patch names. An empty list means no
    /// restriction.
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allow: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        Self {
            allow: (!allow.is_empty()).then_some(allow),
            exclude: BTreeSet::new(),
        }
    }

    /// Parse an operator-supplied `name1,name2,...` list. Items are trimmed of
    /// spaces and tabs and empty items are dropped.
    pub fn from_comma_list(list: &str) -> Self {
        Self::only(
            list.split(',')
                .map(|item| item.trim_matches(|c| c == ' ' || c == '\t'))
                .filter(|item| !item.is_empty()),
        )
    }

    pub fn allow_list(&self) -> Option<&BTreeSet<String>> {
        self.allow.as_ref()
    }

    /// Reject the patch called `name` from now on; wins over the allow-list.
    pub fn exclude(&mut self, name: impl Into<String>) {
        self.exclude.insert(name.into());
    }

    pub fn with_excluded(mut self, name: impl Into<String>) -> Self {
        self.exclude(name);
        self
    }

    pub fn excluded(&self) -> &BTreeSet<String> {
        &self.exclude
    }

    /// Whether `patch` is exported.
    pub fn includes(&self, patch: &Patch) -> bool {
        if patch.is_empty_type() || self.exclude.contains(patch.name()) {
            return false;
        }
        match &self.allow {
            Some(names) => names.contains(patch.name()),
            None => true,
        }
    }

    /// Included patches together with their index in `patches`.
    pub fn included<'a>(
        &'a self,
        patches: &'a [Patch],
    ) -> impl Iterator<Item = (usize, &'a Patch)> + 'a {
        patches
            .iter()
            .enumerate()
            .filter(move |(_, patch)| self.includes(patch))
    }
}

//! Outline highlight for hoverable book meshes

/// Host mesh whose material list can be swapped.
pub trait MaterialSlots {
    type Material: Clone;

    fn materials(&self) -> Vec<Self::Material>;
    fn set_materials(&mut self, materials: Vec<Self::Material>);
}

/// Appends an outline material while the pointer is over the mesh.
///
/// The original material list is captured once at construction and is what
/// the mesh returns to on exit, so repeated enters never stack outlines.
#[derive(Debug)]
pub struct BookHover<R: MaterialSlots> {
    mesh: R,
    outline: Option<R::Material>,
    originals: Vec<R::Material>,
    outlined: bool,
}

impl<R: MaterialSlots> BookHover<R> {
    pub fn new(mesh: R, outline: Option<R::Material>) -> Self {
        let originals = mesh.materials();
        Self {
            mesh,
            outline,
            originals,
            outlined: false,
        }
    }

    pub fn pointer_enter(&mut self) {
        let Some(outline) = &self.outline else {
            log::error!("No outline material assigned, hover highlight disabled");
            return;
        };

        log::debug!("Pointer entered book, outline on");
        let mut materials = self.originals.clone();
        materials.push(outline.clone());
        self.mesh.set_materials(materials);
        self.outlined = true;
    }

    pub fn pointer_exit(&mut self) {
        log::debug!("Pointer left book, outline off");
        self.mesh.set_materials(self.originals.clone());
        self.outlined = false;
    }

    pub fn is_outlined(&self) -> bool {
        self.outlined
    }

    pub fn mesh(&self) -> &R {
        &self.mesh
    }
}

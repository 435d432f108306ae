//! The layout graph: positioned glyphs and routed connectors.
//!
//! Layout elements pair 1:1 with model elements that carry visual geometry,
//! under the same ID. The graph is a root [`Canvas`] over an ID-keyed table
//! kept in construction order; complex glyphs nest their member glyphs as
//! children.

use indexmap::IndexMap;

use plastid_core::{
    geometry::{Bounds, Point, Shape, ShapeClass, Size},
    identifier::Id,
};

/// The root canvas of the layout graph.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Canvas {
    position: Point,
    size: Size,
}

impl Canvas {
    pub fn new(position: Point, size: Size) -> Self {
        Self { position, size }
    }

    /// Top-left corner of the canvas.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn width(&self) -> f64 {
        self.size.width()
    }

    pub fn height(&self) -> f64 {
        self.size.height()
    }
}

/// A positioned shape in the layout graph.
///
/// The position is the shape's center, matching how connectors are routed.
#[derive(Debug, Clone)]
pub struct Glyph {
    id: Id,
    class: ShapeClass,
    bounds: Bounds,
    label: Option<String>,
    children: Vec<Id>,
}

impl Glyph {
    pub fn new(id: Id, class: ShapeClass, bounds: Bounds, label: Option<String>) -> Self {
        Self {
            id,
            class,
            bounds,
            label,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    /// The center of the glyph.
    pub fn position(&self) -> Point {
        self.bounds.center()
    }

    pub fn width(&self) -> f64 {
        self.bounds.width()
    }

    pub fn height(&self) -> f64 {
        self.bounds.height()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The geometric view connector routing works against.
    pub fn shape(&self) -> Shape {
        Shape::new(self.class, self.bounds)
    }

    /// Nested glyphs, in construction order.
    pub fn children(&self) -> &[Id] {
        &self.children
    }

    /// Owner append during construction.
    pub(crate) fn push_child(&mut self, child: Id) {
        self.children.push(child);
    }
}

/// A routed connector polyline: `[start] + intermediates + [end]`.
#[derive(Debug, Clone)]
pub struct Connector {
    id: Id,
    points: Vec<Point>,
}

impl Connector {
    /// Creates a connector from its ordered points. Callers supply at least
    /// the start and end point.
    pub fn new(id: Id, points: Vec<Point>) -> Self {
        debug_assert!(points.len() >= 2, "connector needs a start and an end");
        Self { id, points }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    /// The ordered points of the polyline.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn start(&self) -> Point {
        self.points[0]
    }

    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Iterates over the polyline's segments as point pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

/// One element of the layout graph.
#[derive(Debug, Clone)]
pub enum LayoutElement {
    Glyph(Glyph),
    Connector(Connector),
}

impl LayoutElement {
    pub fn id(&self) -> Id {
        match self {
            LayoutElement::Glyph(glyph) => glyph.id(),
            LayoutElement::Connector(connector) => connector.id(),
        }
    }
}

/// The layout graph: a canvas over layout elements in construction order.
#[derive(Debug, Clone, Default)]
pub struct LayoutGraph {
    canvas: Canvas,
    elements: IndexMap<Id, LayoutElement>,
    roots: Vec<Id>,
}

impl LayoutGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Looks up any layout element by ID.
    pub fn get(&self, id: Id) -> Option<&LayoutElement> {
        self.elements.get(&id)
    }

    /// The glyph registered under `id`, if any.
    pub fn glyph(&self, id: Id) -> Option<&Glyph> {
        match self.elements.get(&id)? {
            LayoutElement::Glyph(glyph) => Some(glyph),
            _ => None,
        }
    }

    /// The connector registered under `id`, if any.
    pub fn connector(&self, id: Id) -> Option<&Connector> {
        match self.elements.get(&id)? {
            LayoutElement::Connector(connector) => Some(connector),
            _ => None,
        }
    }

    /// Returns true when an element is registered under `id`.
    pub fn contains(&self, id: Id) -> bool {
        self.elements.contains_key(&id)
    }

    /// The total number of layout elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true when the graph holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates over every element in construction order.
    pub fn iter(&self) -> impl Iterator<Item = (Id, &LayoutElement)> {
        self.elements.iter().map(|(id, element)| (*id, element))
    }

    /// Top-level elements (not nested in a complex glyph), in construction
    /// order.
    pub fn roots(&self) -> &[Id] {
        &self.roots
    }

    /// Registers an element. Top-level elements are appended to the root
    /// order; nested ones are reachable through their owner's children.
    pub(crate) fn insert(&mut self, element: LayoutElement, top_level: bool) {
        let id = element.id();
        debug_assert!(
            !self.elements.contains_key(&id),
            "layout element registered twice: {id}"
        );
        self.elements.insert(id, element);
        if top_level {
            self.roots.push(id);
        }
    }

    /// Mutable access for owner appends during construction.
    pub(crate) fn glyph_mut(&mut self, id: Id) -> Option<&mut Glyph> {
        match self.elements.get_mut(&id)? {
            LayoutElement::Glyph(glyph) => Some(glyph),
            _ => None,
        }
    }

    /// The merged bounds of every glyph, used when the document declares no
    /// canvas.
    pub(crate) fn glyph_bounds(&self) -> Option<Bounds> {
        self.elements
            .values()
            .filter_map(|element| match element {
                LayoutElement::Glyph(glyph) => Some(glyph.bounds()),
                LayoutElement::Connector(_) => None,
            })
            .reduce(|merged, bounds| merged.merge(&bounds))
    }

    pub(crate) fn set_canvas(&mut self, canvas: Canvas) {
        self.canvas = canvas;
    }
}

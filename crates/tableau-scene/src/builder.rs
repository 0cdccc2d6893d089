use tableau_engine::scene::{
    Arc, Circle, Ellipse, Graph, Kind, Line, Options, Path, Primitive, Quad, Rectangle,
    RoundedRectangle, SceneError, SceneRef, Sector, Shape, Text, Triangle,
};

// ── Builder ───────────────────────────────────────────────────────────────

/// One method per primitive type, usable on a [`Graph`] or on a
/// [`Primitive`].
///
/// - On a `Graph`, each call validates the data, inserts a new primitive
///   into the current group and returns the graph.
/// - On a `Primitive` of the same type, each call validates the data,
///   replaces the primitive's data, merges the options and returns the
///   primitive. The caller writes it back with [`Graph::modify`]. A
///   primitive of another type fails with [`SceneError::KindMismatch`].
///
/// Data arguments accept the shorthand forms through `From`: a bare radius
/// for a circle, `(w, h)` for a rect, a string for text.
///
/// ```
/// use tableau_engine::paint::Color;
/// use tableau_engine::scene::{opts, Graph, SceneError};
/// use tableau_scene::builder::Builder;
///
/// fn scene() -> Result<Graph, SceneError> {
///     Graph::build()
///         .rect((100.0, 200.0), opts().fill(Color::BLUE))?
///         .text("Hello", opts().id("hello").translate(10.0, 10.0))
/// }
/// # assert_eq!(scene().unwrap().len(), 3);
/// ```
pub trait Builder: Sized {
    /// Adds or applies a typed shape.
    fn add<S: Shape>(self, shape: S, options: Options) -> Result<Self, SceneError>;

    /// Adds or applies untyped data of `kind`, accepting every shorthand.
    fn add_value(
        self,
        kind: Kind,
        raw: &serde_json::Value,
        options: Options,
    ) -> Result<Self, SceneError>;

    fn arc(self, data: impl Into<Arc>, options: Options) -> Result<Self, SceneError> {
        self.add::<Arc>(data.into(), options)
    }

    fn circle(self, data: impl Into<Circle>, options: Options) -> Result<Self, SceneError> {
        self.add::<Circle>(data.into(), options)
    }

    fn ellipse(self, data: impl Into<Ellipse>, options: Options) -> Result<Self, SceneError> {
        self.add::<Ellipse>(data.into(), options)
    }

    fn line(self, data: impl Into<Line>, options: Options) -> Result<Self, SceneError> {
        self.add::<Line>(data.into(), options)
    }

    fn path(self, data: impl Into<Path>, options: Options) -> Result<Self, SceneError> {
        self.add::<Path>(data.into(), options)
    }

    fn quad(self, data: impl Into<Quad>, options: Options) -> Result<Self, SceneError> {
        self.add::<Quad>(data.into(), options)
    }

    fn rect(self, data: impl Into<Rectangle>, options: Options) -> Result<Self, SceneError> {
        self.add::<Rectangle>(data.into(), options)
    }

    fn rounded_rect(
        self,
        data: impl Into<RoundedRectangle>,
        options: Options,
    ) -> Result<Self, SceneError> {
        self.add::<RoundedRectangle>(data.into(), options)
    }

    fn scene_ref(self, data: impl Into<SceneRef>, options: Options) -> Result<Self, SceneError> {
        self.add::<SceneRef>(data.into(), options)
    }

    fn sector(self, data: impl Into<Sector>, options: Options) -> Result<Self, SceneError> {
        self.add::<Sector>(data.into(), options)
    }

    fn text(self, data: impl Into<Text>, options: Options) -> Result<Self, SceneError> {
        self.add::<Text>(data.into(), options)
    }

    fn triangle(self, data: impl Into<Triangle>, options: Options) -> Result<Self, SceneError> {
        self.add::<Triangle>(data.into(), options)
    }
}

impl Builder for Graph {
    fn add<S: Shape>(self, shape: S, options: Options) -> Result<Self, SceneError> {
        self.insert(shape, options)
    }

    fn add_value(
        self,
        kind: Kind,
        raw: &serde_json::Value,
        options: Options,
    ) -> Result<Self, SceneError> {
        self.insert_value(kind, raw, options)
    }
}

impl Builder for Primitive {
    fn add<S: Shape>(self, shape: S, options: Options) -> Result<Self, SceneError> {
        self.update(shape, options)
    }

    fn add_value(
        self,
        kind: Kind,
        raw: &serde_json::Value,
        options: Options,
    ) -> Result<Self, SceneError> {
        if kind != self.kind() {
            return Err(SceneError::KindMismatch {
                uid: self.uid(),
                expected: kind,
                actual: self.kind(),
            });
        }
        self.update_value(raw, options)
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────

/// Nested construction on a [`Graph`].
pub trait GraphBuilder: Sized {
    /// Inserts a group carrying `options`, runs `f` with the group as the
    /// insertion context and closes it again.
    ///
    /// `f` must leave the group context as it found it: a `close_group`
    /// inside `f` that closes the new group fails with
    /// [`SceneError::UnbalancedGroup`].
    fn group<F>(self, f: F, options: Options) -> Result<Self, SceneError>
    where
        F: FnOnce(Self) -> Result<Self, SceneError>;
}

impl GraphBuilder for Graph {
    fn group<F>(self, f: F, options: Options) -> Result<Self, SceneError>
    where
        F: FnOnce(Self) -> Result<Self, SceneError>,
    {
        let graph = self.open_group(options)?;
        let uid = graph.current_group();
        let graph = f(graph)?;
        if graph.current_group() != uid {
            return Err(SceneError::UnbalancedGroup);
        }
        graph.close_group()
    }
}

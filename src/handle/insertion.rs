use super::Handle;
use crate::error::{Error, ErrorKind};
use crate::insert::{self, Edge, Mode, Options};
use crate::queue::Step;
use crate::resolve::Source;
use crate::targets::Targets;
use web_sys::Node;

/// Inserting, moving, cloning, replacing and removing elements.
impl Handle {
    /// Append each child to every element. Strings are markup if they start
    /// with `<`, selectors otherwise. Markup is sanitized.
    pub fn append<I>(&self, children: I) -> Result<&Self, Error>
    where
        I: IntoIterator,
        I::Item: Into<Source>,
    {
        self.insert("append", children, Options::default().sanitize, Edge::End)
    }

    /// `append`, choosing whether markup is sanitized.
    pub fn append_with<I>(&self, children: I, options: Options) -> Result<&Self, Error>
    where
        I: IntoIterator,
        I::Item: Into<Source>,
    {
        self.insert("append", children, options.sanitize, Edge::End)
    }

    /// Insert the children, in order, before the first child of every
    /// element.
    pub fn prepend<I>(&self, children: I) -> Result<&Self, Error>
    where
        I: IntoIterator,
        I::Item: Into<Source>,
    {
        self.insert("prepend", children, Options::default().sanitize, Edge::Start)
    }

    /// `prepend`, choosing whether markup is sanitized.
    pub fn prepend_with<I>(&self, children: I, options: Options) -> Result<&Self, Error>
    where
        I: IntoIterator,
        I::Item: Into<Source>,
    {
        self.insert("prepend", children, options.sanitize, Edge::Start)
    }

    fn insert<I>(
        &self,
        method: &'static str,
        children: I,
        sanitize: bool,
        edge: Edge,
    ) -> Result<&Self, Error>
    where
        I: IntoIterator,
        I::Item: Into<Source>,
    {
        let children: Vec<Source> = children.into_iter().map(Into::into).collect();
        let document = self.dom.document().clone();
        self.fan_out(method, move |el| {
            insert::insert_children(&document, el, &children, sanitize, edge)
        })
    }

    /// Put deep clones of the elements at `destination`; `options.mode` is
    /// ignored.
    pub fn clone_to(&self, destination: impl Into<Source>, options: Options) -> Result<&Self, Error> {
        self.relocate(
            "clone_to",
            destination.into(),
            Options {
                mode: Mode::Clone,
                ..options
            },
        )
    }

    /// Move the elements to `destination`; `options.mode` is ignored.
    pub fn move_to(&self, destination: impl Into<Source>, options: Options) -> Result<&Self, Error> {
        self.relocate(
            "move_to",
            destination.into(),
            Options {
                mode: Mode::Move,
                ..options
            },
        )
    }

    fn relocate(
        &self,
        method: &'static str,
        destination: Source,
        options: Options,
    ) -> Result<&Self, Error> {
        let document = self.dom.document().clone();
        self.dispatch(method, move |targets| {
            insert::move_or_clone(&document, targets.as_slice(), &destination, &options)?;
            Ok(Step::Done)
        })
    }

    /// Replace the elements with those of `replacements`.
    ///
    /// A single element is replaced by all the replacement elements; a
    /// collection is replaced pairwise, by index.
    pub fn replace_with(&self, replacements: &Handle, mode: Mode) -> Result<&Self, Error> {
        let replacements = replacements.targets.clone();
        self.dispatch("replace_with", move |targets| {
            match targets {
                Targets::Single(None) => return Err(ErrorKind::MissingTarget),
                Targets::Single(Some(el)) => {
                    if replacements.is_empty() {
                        return Err(ErrorKind::MissingReplacement { index: 0 });
                    }
                    let nodes = js_sys::Array::new();
                    for replacement in replacements.iter() {
                        let node: Node = insert::prepare(replacement, mode)?;
                        nodes.push(&node);
                    }
                    el.replace_with_with_node(&nodes)?;
                }
                Targets::Many(els) => {
                    for (index, el) in els.iter().enumerate() {
                        let replacement = replacements
                            .as_slice()
                            .get(index)
                            .ok_or(ErrorKind::MissingReplacement { index })?;
                        el.replace_with_with_node_1(&insert::prepare(replacement, mode)?)?;
                    }
                }
            }
            Ok(Step::Done)
        })
    }

    /// Detach the elements from the document.
    pub fn remove(&self) -> Result<&Self, Error> {
        self.fan_out("remove", |el| {
            el.remove();
            Ok(())
        })
    }
}

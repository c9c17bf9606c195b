//! Story arena with id lookup.

use std::collections::HashMap;

use super::Story;
use crate::error::{PlanError, Result};

/// Owns the stories of one planning run, in input order.
///
/// Construction validates every story, rejects duplicate ids, and checks
/// that every child id resolves to a story in the same backlog. Stories
/// are addressed by their position (index) or by id.
#[derive(Debug, Clone, Default)]
pub struct Backlog {
    stories: Vec<Story>,
    index: HashMap<String, usize>,
}

impl Backlog {
    /// Builds a backlog from stories in input order.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_sprint::model::{Backlog, Story};
    ///
    /// let backlog = Backlog::new(vec![
    ///     Story::new("A", 2.0).unwrap().with_child("B"),
    ///     Story::new("B", 1.0).unwrap(),
    /// ])
    /// .unwrap();
    /// assert_eq!(backlog.len(), 2);
    /// assert_eq!(backlog.index_of("B"), Some(1));
    /// ```
    pub fn new(stories: Vec<Story>) -> Result<Self> {
        let mut index = HashMap::with_capacity(stories.len());
        for (i, story) in stories.iter().enumerate() {
            story.validate()?;
            if index.insert(story.id.clone(), i).is_some() {
                return Err(PlanError::DuplicateStory(story.id.clone()));
            }
        }
        for story in &stories {
            if let Some(child) = story.children().find(|c| !index.contains_key(*c)) {
                return Err(PlanError::UnknownStory {
                    parent: story.id.clone(),
                    child: child.to_string(),
                });
            }
        }
        Ok(Self { stories, index })
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    /// Stories in input order.
    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn iter(&self) -> impl Iterator<Item = &Story> {
        self.stories.iter()
    }

    /// Position of the story with `id`.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn get(&self, id: &str) -> Option<&Story> {
        self.index_of(id).map(|i| &self.stories[i])
    }

    pub(crate) fn at(&self, i: usize) -> &Story {
        &self.stories[i]
    }

    pub(crate) fn at_mut(&mut self, i: usize) -> &mut Story {
        &mut self.stories[i]
    }

    /// Consumes the backlog, returning the stories in input order.
    pub fn into_stories(self) -> Vec<Story> {
        self.stories
    }
}

//! Progression engine - curriculum position derived from completions.
//!
//! Queries are read-only. Each public query takes one snapshot of the
//! completion store and evaluates against it, so a query never sees a
//! half-applied write.
//!
//! Topic completion is vacuous: a topic with no known exercises is done, so
//! missing content never blocks progression. Advancement only moves forward,
//! along `TOPIC_ORDER` within a level and then along `LEVEL_ORDER`.

use std::collections::BTreeSet;
use grammatik_core::{
    CompletionData, Exercise, Level, LevelSummary, ProgressionStatus, RecommendedProgression,
    Topic, TopicProgress, LEVEL_ORDER, TOPIC_ORDER,
};
use grammatik_storage::KeyValueStore;
use crate::store::CompletionStore;

/// Level following `current_level` in the curriculum.
///
/// Case-insensitive. Unknown tags and the final level yield `None`.
pub fn get_next_level(current_level: &str) -> Option<Level> {
    Level::parse(current_level)?.next()
}

/// Read-only progression queries over a [`CompletionStore`].
pub struct ProgressionEngine<'a, S: KeyValueStore> {
    store: &'a CompletionStore<S>,
}

impl<'a, S: KeyValueStore> ProgressionEngine<'a, S> {
    /// Create an engine reading from `store`.
    pub fn new(store: &'a CompletionStore<S>) -> Self {
        Self { store }
    }

    /// Ids of completed exercises recorded at `level` and tagged with `topic`.
    pub fn get_completed_exercises_for_topic(&self, level: Level, topic: Topic) -> BTreeSet<String> {
        let data = self.store.get_completion_data();
        completed_for_topic(&data, level, topic)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Whether every exercise tagged with `topic` has been completed at `level`.
    ///
    /// `all_exercises` is used as given; callers pass the exercises of one level.
    pub fn are_all_exercises_completed_for_topic(
        &self,
        level: Level,
        topic: Topic,
        all_exercises: &[Exercise],
    ) -> bool {
        let data = self.store.get_completion_data();
        topic_complete(&data, level, topic, all_exercises)
    }

    /// First topic after `current_topic` that is not yet complete.
    ///
    /// Never returns `current_topic` or an earlier topic.
    pub fn get_next_topic(
        &self,
        current_level: Level,
        current_topic: Topic,
        all_exercises: &[Exercise],
    ) -> Option<Topic> {
        let data = self.store.get_completion_data();
        next_topic(&data, current_level, current_topic, all_exercises)
    }

    /// Whether every topic of `level` is complete.
    pub fn are_all_topics_completed_for_level(&self, level: Level, all_exercises: &[Exercise]) -> bool {
        let data = self.store.get_completion_data();
        level_complete(&data, level, all_exercises)
    }

    /// Advancement decision for a learner at (`level`, `topic`).
    pub fn get_current_progression(
        &self,
        level: Level,
        topic: Topic,
        all_exercises: &[Exercise],
    ) -> ProgressionStatus {
        let data = self.store.get_completion_data();

        let upcoming_topic = next_topic(&data, level, topic, all_exercises);
        let should_advance_topic =
            topic_complete(&data, level, topic, all_exercises) && upcoming_topic.is_some();

        let next_level = level.next();
        let should_advance_level =
            level_complete(&data, level, all_exercises) && next_level.is_some();

        ProgressionStatus {
            should_advance_topic,
            next_topic: upcoming_topic.filter(|_| should_advance_topic),
            should_advance_level,
            next_level: next_level.filter(|_| should_advance_level),
        }
    }

    /// Earliest incomplete (level, topic) pair across the whole curriculum.
    ///
    /// Returns the final level and topic once everything is complete.
    pub fn get_recommended_progression(&self, all_exercises: &[Exercise]) -> RecommendedProgression {
        let data = self.store.get_completion_data();

        for level in LEVEL_ORDER {
            let level_exercises = exercises_at(level, all_exercises);
            for topic in TOPIC_ORDER {
                if !topic_complete(&data, level, topic, &level_exercises) {
                    return RecommendedProgression { level, topic };
                }
            }
        }

        RecommendedProgression::terminal()
    }

    /// Completed and total counts for (`level`, `topic`).
    ///
    /// Filters `all_exercises` by topic only, like
    /// [`are_all_exercises_completed_for_topic`](Self::are_all_exercises_completed_for_topic).
    pub fn get_topic_progress(&self, level: Level, topic: Topic, all_exercises: &[Exercise]) -> TopicProgress {
        let data = self.store.get_completion_data();
        topic_progress(&data, level, topic, all_exercises)
    }

    /// Per-topic progress of `level`, using only the catalog's exercises at that level.
    pub fn get_level_summary(&self, level: Level, all_exercises: &[Exercise]) -> LevelSummary {
        let data = self.store.get_completion_data();
        let level_exercises = exercises_at(level, all_exercises);
        LevelSummary {
            level,
            topics: TOPIC_ORDER
                .iter()
                .map(|&topic| topic_progress(&data, level, topic, &level_exercises))
                .collect(),
        }
    }
}

fn exercises_at(level: Level, all_exercises: &[Exercise]) -> Vec<Exercise> {
    all_exercises
        .iter()
        .filter(|e| e.level == level)
        .cloned()
        .collect()
}

fn completed_for_topic(data: &CompletionData, level: Level, topic: Topic) -> BTreeSet<&str> {
    data.iter()
        .filter(|r| r.level == level && r.has_topic(topic))
        .map(|r| r.exercise_id.as_str())
        .collect()
}

fn topic_progress(
    data: &CompletionData,
    level: Level,
    topic: Topic,
    all_exercises: &[Exercise],
) -> TopicProgress {
    let completed_ids = completed_for_topic(data, level, topic);
    let topic_exercises: Vec<&Exercise> = all_exercises.iter().filter(|e| e.has_topic(topic)).collect();

    TopicProgress {
        level,
        topic,
        completed: topic_exercises
            .iter()
            .filter(|e| completed_ids.contains(e.id.as_str()))
            .count(),
        total: topic_exercises.len(),
    }
}

fn topic_complete(data: &CompletionData, level: Level, topic: Topic, all_exercises: &[Exercise]) -> bool {
    topic_progress(data, level, topic, all_exercises).is_complete()
}

fn next_topic(
    data: &CompletionData,
    level: Level,
    current_topic: Topic,
    all_exercises: &[Exercise],
) -> Option<Topic> {
    current_topic
        .following()
        .iter()
        .copied()
        .find(|&topic| !topic_complete(data, level, topic, all_exercises))
}

fn level_complete(data: &CompletionData, level: Level, all_exercises: &[Exercise]) -> bool {
    TOPIC_ORDER
        .iter()
        .all(|&topic| topic_complete(data, level, topic, all_exercises))
}

//! # Engine
//!
//! The control loop. One [`Engine`] owns all reasoning state: memory, the
//! global input buffer, the event buffer, the operation queue and the RNG.
//! It does a bounded amount of work per [`Engine::step`] and never blocks.
//!
//! ## One step
//!
//! 1. Advance the cycle counter.
//! 2. Drain the input buffer, up to the number of sentences it held when the
//!    step began. Each sentence is routed by punctuation to judgment,
//!    question or goal processing; derived sentences go back to the buffer.
//! 3. Run the background Consider steps.
//! 4. Execute due operations and feed each one back as an observed event.
//!
//! ## Output
//!
//! Answers and executed operations are queued as [`EngineEvent`]s for the
//! driver to drain. Operations are also sent to the [`Actuator`].

use crate::containers::Buffer;
use crate::formats::{BeliefSnapshot, SnapshotEntry};
use crate::inference::{contrapose, infer, infer_temporal};
use crate::memory::{LinkKind, Memory};
use crate::primitives::{
    ACTED_GOAL_MEMORY, CONSIDER_MAX_HOPS, DEFAULT_ITEM_PRIORITY, GOAL_CONCEPT_QUALITY,
};
use crate::rules::conditional::conjuncts;
use crate::rules::{local, InferenceContext, Rule};
use crate::sentence::{parse_sentence, Sentence, SentenceKind};
use crate::temporal::EventBuffer;
use crate::term::{parse_term, Term};
use crate::truth::EvidentialValue;
use crate::types::{IdSequence, SentenceId};
use crate::{NarsConfig, NarsError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::fmt;
use tracing::{debug, trace};

// =============================================================================
// ACTUATOR
// =============================================================================

/// Receiver of motor commands.
///
/// Called once per executed atomic operation. The engine does not wait for
/// a result: the operation is recorded as having happened right away.
pub trait Actuator: Send + Sync {
    fn send_motor_command(&mut self, operation: &Term);
}

/// Actuator that ignores every command.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullActuator;

impl Actuator for NullActuator {
    fn send_motor_command(&mut self, _operation: &Term) {}
}

// =============================================================================
// OUTPUT EVENTS
// =============================================================================

/// Something the engine wants its driver to see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    /// Best belief for a submitted question. Emitted once per question.
    Answer { question: String, answer: String },
    /// An operation sent to the actuator.
    Executed {
        operation: String,
        desirability: f64,
        cycle: u64,
    },
}

impl fmt::Display for EngineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Answer { question, answer } => write!(f, "OUT: {} (for {})", answer, question),
            Self::Executed {
                operation,
                desirability,
                cycle,
            } => write!(
                f,
                "EXE: {} (desirability {:.3}, cycle {})",
                operation, desirability, cycle
            ),
        }
    }
}

/// An atomic operation waiting for its delay to run out.
#[derive(Debug, Clone)]
struct PendingOperation {
    operation: Term,
    delay: u32,
}

// =============================================================================
// ACTED GOALS
// =============================================================================

/// Bounded FIFO set of sentence ids.
#[derive(Debug)]
struct IdMemory {
    ids: HashSet<SentenceId>,
    order: VecDeque<SentenceId>,
}

impl IdMemory {
    fn new() -> Self {
        Self {
            ids: HashSet::new(),
            order: VecDeque::new(),
        }
    }

    fn contains(&self, id: SentenceId) -> bool {
        self.ids.contains(&id)
    }

    fn insert(&mut self, id: SentenceId) {
        if !self.ids.insert(id) {
            return;
        }
        self.order.push_back(id);
        while self.order.len() > ACTED_GOAL_MEMORY {
            if let Some(old) = self.order.pop_front() {
                self.ids.remove(&old);
            }
        }
    }
}

/// Goals already carried out, and the evidence behind them.
///
/// A goal counts as carried out when its own id was acted on, when every
/// other id in its evidential base backed a goal that was acted on, or when
/// it was derived from a carried-out goal. A revision counts as derived
/// from a carried-out goal only when both of its premises were.
#[derive(Debug)]
struct ActedGoals {
    goals: IdMemory,
    evidence: IdMemory,
}

impl ActedGoals {
    fn new() -> Self {
        Self {
            goals: IdMemory::new(),
            evidence: IdMemory::new(),
        }
    }

    fn record(&mut self, goal: &Sentence) {
        self.goals.insert(goal.id());
        for id in goal.stamp().evidential_base().iter() {
            self.evidence.insert(id);
        }
    }

    /// Whether `goal` was carried out. Positive answers are remembered so
    /// that goals derived from `goal` inherit them.
    fn settled(&mut self, goal: &Sentence) -> bool {
        if self.goals.contains(goal.id()) {
            return true;
        }
        let stamp = goal.stamp();
        let mut evidence = stamp
            .evidential_base()
            .iter()
            .filter(|id| *id != goal.id())
            .peekable();
        let known_evidence =
            evidence.peek().is_some() && evidence.all(|id| self.evidence.contains(id));

        let parents = stamp.parent_premises();
        let from_settled = match stamp.derived_by() {
            None => false,
            Some(Rule::Revision) => {
                !parents.is_empty() && parents.iter().all(|id| self.goals.contains(*id))
            }
            Some(_) => parents.iter().any(|id| self.goals.contains(*id)),
        };

        let settled = known_evidence || from_settled;
        if settled {
            self.goals.insert(goal.id());
        }
        settled
    }
}

// =============================================================================
// ENGINE
// =============================================================================

/// A single reasoning engine instance.
pub struct Engine<A: Actuator = NullActuator> {
    config: NarsConfig,
    actuator: A,
    rng: StdRng,
    ids: IdSequence,
    cycle: u64,
    buffer: Buffer<Sentence>,
    memory: Memory,
    events: EventBuffer,
    operations: VecDeque<PendingOperation>,
    /// Goal whose operations are queued.
    current_goal: Option<Sentence>,
    acted: ActedGoals,
    outputs: Vec<EngineEvent>,
}

impl Engine<NullActuator> {
    /// Engine with no actuator attached.
    pub fn with_config(config: NarsConfig) -> Result<Self, NarsError> {
        Self::new(config, NullActuator)
    }
}

impl<A: Actuator> Engine<A> {
    /// Build an engine. Fails with `InvalidConfig` on bad settings.
    pub fn new(config: NarsConfig, actuator: A) -> Result<Self, NarsError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            buffer: Buffer::new(config.global_buffer_capacity),
            memory: Memory::new(&config),
            events: EventBuffer::new(config.event_buffer_capacity),
            config,
            actuator,
            rng,
            ids: IdSequence::new(),
            cycle: 0,
            operations: VecDeque::new(),
            current_goal: None,
            acted: ActedGoals::new(),
            outputs: Vec::new(),
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn config(&self) -> &NarsConfig {
        &self.config
    }

    #[must_use]
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    #[must_use]
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Sentences waiting in the input buffer.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Operations queued but not yet executed.
    #[must_use]
    pub fn pending_operations(&self) -> usize {
        self.operations.len()
    }

    #[must_use]
    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    /// Best belief about `term`, if its concept exists.
    #[must_use]
    pub fn best_belief(&self, term: &Term) -> Option<&Sentence> {
        self.memory.concept(term)?.beliefs().peek()
    }

    /// Take all output events produced so far.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.outputs)
    }

    // -------------------------------------------------------------------------
    // Input and stepping
    // -------------------------------------------------------------------------

    /// Parse a sentence and queue it for the next step.
    ///
    /// On a syntax error nothing is queued and no id is used up.
    pub fn submit(&mut self, text: &str) -> Result<SentenceId, NarsError> {
        let mut sentence = parse_sentence(text, &mut self.ids, self.cycle)?;
        sentence.mark_from_input();
        let id = sentence.id();
        debug!(cycle = self.cycle, sentence = %sentence, "input");
        self.enqueue(sentence, DEFAULT_ITEM_PRIORITY);
        Ok(id)
    }

    /// Run one reasoning cycle.
    pub fn step(&mut self) {
        self.cycle += 1;

        let pending = self.buffer.len();
        for _ in 0..pending {
            let Some(sentence) = self.buffer.take() else {
                break;
            };
            self.process(sentence);
        }

        for _ in 0..self.config.consider_per_cycle {
            self.consider();
        }

        self.execute_operations();
    }

    pub fn run_cycles(&mut self, cycles: u64) {
        for _ in 0..cycles {
            self.step();
        }
    }

    fn enqueue(&mut self, sentence: Sentence, priority: f64) {
        if let Some(dropped) = self.buffer.put(sentence, priority) {
            trace!(cycle = self.cycle, sentence = %dropped, "input buffer full");
        }
    }

    /// Queue derived sentences; more confident conclusions come out first.
    fn enqueue_derived(&mut self, derived: Vec<Sentence>) {
        if derived.is_empty() {
            return;
        }
        debug!(cycle = self.cycle, count = derived.len(), "derived");
        for sentence in derived {
            trace!(
                cycle = self.cycle,
                sentence = %sentence,
                rule = ?sentence.stamp().derived_by(),
                "derivation"
            );
            let confidence = sentence.value().map_or(0.5, |v| v.confidence());
            self.enqueue(sentence, DEFAULT_ITEM_PRIORITY * confidence);
        }
    }

    fn process(&mut self, sentence: Sentence) {
        if sentence.statement().contains_variable() {
            trace!(cycle = self.cycle, sentence = %sentence, "variables are not processed");
            return;
        }
        match sentence.kind() {
            SentenceKind::Judgment(_) => self.process_judgment(sentence),
            SentenceKind::Question => self.process_question(sentence),
            SentenceKind::Goal(_) => self.process_goal(sentence),
        }
    }

    /// `infer`, with "no result" outcomes logged and dropped.
    fn try_infer(&mut self, j1: &Sentence, j2: &Sentence) -> Vec<Sentence> {
        let mut ctx = InferenceContext::new(&self.config, &mut self.ids, self.cycle);
        match infer(&mut ctx, j1, j2) {
            Ok(results) => results,
            Err(e) => {
                trace!(cycle = self.cycle, j1 = %j1, j2 = %j2, error = %e, "inference skipped");
                Vec::new()
            }
        }
    }

    // -------------------------------------------------------------------------
    // Judgments
    // -------------------------------------------------------------------------

    fn process_judgment(&mut self, j: Sentence) {
        let mut derived = Vec::new();
        if j.is_event() && j.is_from_input() {
            derived.extend(self.observe_event(&j));
        }

        let term = j.statement().clone();
        if !self.memory.conceptualize(&term, &mut self.rng) {
            return;
        }
        self.memory.activate(&term);
        self.memory.strengthen_quality(&term);

        let mut ctx = InferenceContext::new(&self.config, &mut self.ids, self.cycle);
        if j.is_from_input() {
            derived.extend(contrapose(&mut ctx, &j));
        }
        let Some(concept) = self.memory.concept_mut(&term) else {
            return;
        };
        if let Some(revised) = concept.beliefs_mut().put(j, &mut ctx) {
            debug!(cycle = self.cycle, belief = %revised, "revised");
        }
        let best = concept.beliefs().peek().cloned();

        if let Some(best) = best {
            derived.extend(self.semantic_inference(&best));
        }
        self.enqueue_derived(derived);
    }

    /// Remember an input event; with temporal chaining, pair it with the
    /// events before it.
    fn observe_event(&mut self, event: &Sentence) -> Vec<Sentence> {
        let mut derived = Vec::new();
        if self.config.temporal_chaining {
            let mut ctx = InferenceContext::new(&self.config, &mut self.ids, self.cycle);
            for earlier in self.events.iter() {
                derived.extend(infer_temporal(&mut ctx, earlier, event));
            }
        }
        self.events.push(event.clone());
        derived
    }

    /// Infer `j` against a concept related to its statement.
    ///
    /// - compound statements: a prediction link
    /// - higher-order statements: nothing
    /// - first-order events: an explanation link, else a superterm link
    /// - otherwise: the semantically related concept search
    fn semantic_inference(&mut self, j: &Sentence) -> Vec<Sentence> {
        let term = j.statement();
        let related = match self.memory.concept(term) {
            None => None,
            Some(concept) if term.is_compound() => {
                self.memory
                    .follow_link(concept, LinkKind::Prediction, &mut self.rng)
            }
            Some(_) if !term.is_first_order() => None,
            Some(concept) if j.is_event() => self
                .memory
                .follow_link(concept, LinkKind::Explanation, &mut self.rng)
                .or_else(|| {
                    self.memory
                        .follow_link(concept, LinkKind::Superterm, &mut self.rng)
                }),
            Some(_) => self.memory.semantically_related(term, &mut self.rng),
        };
        let Some(related) = related else {
            return Vec::new();
        };

        let belief = related.beliefs().peek().cloned();
        let desire = related.desires().peek_random(&mut self.rng).cloned();

        let mut derived = Vec::new();
        for premise in [belief, desire].into_iter().flatten() {
            derived.extend(self.try_infer(j, &premise));
        }
        derived
    }

    // -------------------------------------------------------------------------
    // Questions
    // -------------------------------------------------------------------------

    fn process_question(&mut self, mut question: Sentence) {
        let term = question.statement().clone();
        if !self.memory.conceptualize(&term, &mut self.rng) {
            return;
        }
        self.memory.strengthen_quality(&term);

        let subject = match self.best_belief(&term).cloned() {
            Some(answer) => {
                if question.is_from_input() && question.needs_answer() {
                    question.mark_answered();
                    debug!(cycle = self.cycle, question = %question, answer = %answer, "answer");
                    self.outputs.push(EngineEvent::Answer {
                        question: question.render_at(self.cycle),
                        answer: answer.render_at(self.cycle),
                    });
                }
                answer
            }
            None => question,
        };
        let derived = self.semantic_inference(&subject);
        self.enqueue_derived(derived);
    }

    // -------------------------------------------------------------------------
    // Goals
    // -------------------------------------------------------------------------

    fn process_goal(&mut self, goal: Sentence) {
        let term = goal.statement().clone();
        if !self.memory.conceptualize(&term, &mut self.rng) {
            return;
        }
        self.memory.activate(&term);
        self.memory.set_quality(&term, GOAL_CONCEPT_QUALITY);

        let mut ctx = InferenceContext::new(&self.config, &mut self.ids, self.cycle);
        let Some(concept) = self.memory.concept_mut(&term) else {
            return;
        };
        self.acted.settled(&goal);
        let revised = concept.desires_mut().put(goal, &mut ctx);
        let best = concept.desires().peek().cloned();
        if let Some(revised) = revised {
            self.acted.settled(&revised);
        }

        if let Some(best) = best {
            let derived = self.pursue_goal(&best);
            self.enqueue_derived(derived);
        }
    }

    /// Continued goal processing: decide, act, or chain backwards.
    fn pursue_goal(&mut self, goal: &Sentence) -> Vec<Sentence> {
        let ctx = InferenceContext::new(&self.config, &mut self.ids, self.cycle);
        if !local::decision(&ctx, goal) {
            return Vec::new();
        }

        let statement = goal.statement();
        if statement.is_op() && !statement.is_negation() && !self.acted.settled(goal) {
            self.queue_operation(goal);
        }

        let achieved = self.best_belief(statement).cloned();
        let ctx = InferenceContext::new(&self.config, &mut self.ids, self.cycle);
        if achieved.is_some_and(|belief| ctx.is_positive(&belief)) {
            return Vec::new();
        }

        let first_conjunct = if statement.is_conjunction() {
            conjuncts(statement).first().copied()
        } else if statement.is_negation() {
            statement
                .subterms()
                .first()
                .filter(|inner| inner.is_conjunction())
                .and_then(|inner| conjuncts(inner).first().copied())
        } else {
            None
        };
        if let Some(conjunct) = first_conjunct {
            let belief = self.best_belief(conjunct).cloned();
            let ctx = InferenceContext::new(&self.config, &mut self.ids, self.cycle);
            if let Some(belief) = belief.filter(|b| ctx.is_positive(b)) {
                return self.try_infer(goal, &belief);
            }
        }

        let means = self
            .memory
            .concept(statement)
            .and_then(|c| self.memory.follow_link(c, LinkKind::Explanation, &mut self.rng))
            .and_then(|c| c.beliefs().peek().cloned());
        match means {
            Some(belief) => self.try_infer(goal, &belief),
            None => Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Replace the queued operations with `goal`'s, if Choice prefers it.
    ///
    /// A compound operation queues each conjunct, delayed by the intervals
    /// before it.
    fn queue_operation(&mut self, goal: &Sentence) {
        if let Some(current) = &self.current_goal {
            if current.statement() == goal.statement() {
                self.acted.record(goal);
                return;
            }
            let ctx = InferenceContext::new(&self.config, &mut self.ids, self.cycle);
            if local::choice(&ctx, current, goal, false).id() == current.id() {
                return;
            }
        }

        self.operations.clear();
        let statement = goal.statement();
        match statement.as_compound() {
            Some(sequence) if sequence.connector().is_conjunction() => {
                let mut delay = 0u32;
                for (index, operation) in sequence.subterms().iter().enumerate() {
                    if index > 0 {
                        let gap = sequence.intervals().get(index - 1).copied().unwrap_or(0);
                        delay = delay.saturating_add(gap);
                    }
                    self.operations.push_back(PendingOperation {
                        operation: operation.clone(),
                        delay,
                    });
                }
            }
            _ => self.operations.push_back(PendingOperation {
                operation: statement.clone(),
                delay: 0,
            }),
        }
        debug!(cycle = self.cycle, goal = %goal, count = self.operations.len(), "operations queued");
        self.acted.record(goal);
        self.current_goal = Some(goal.clone());
    }

    fn execute_operations(&mut self) {
        let mut due = Vec::new();
        self.operations.retain_mut(|pending| {
            if pending.delay == 0 {
                due.push(pending.operation.clone());
                false
            } else {
                pending.delay -= 1;
                true
            }
        });

        let desirability = {
            let ctx = InferenceContext::new(&self.config, &mut self.ids, self.cycle);
            self.current_goal.as_ref().map_or(0.0, |g| ctx.expectation(g))
        };
        if self.operations.is_empty() {
            self.current_goal = None;
        }
        for operation in due {
            self.execute(operation, desirability);
        }
    }

    /// Send `operation` to the actuator and observe it as a present event.
    fn execute(&mut self, operation: Term, desirability: f64) {
        debug!(cycle = self.cycle, operation = %operation, desirability, "EXE");
        self.actuator.send_motor_command(&operation);
        self.outputs.push(EngineEvent::Executed {
            operation: operation.to_string(),
            desirability,
            cycle: self.cycle,
        });

        let mut feedback = Sentence::new(
            operation,
            SentenceKind::Judgment(EvidentialValue::default()),
            self.ids.next_id(),
            Some(self.cycle),
        );
        feedback.mark_from_input();
        self.process_judgment(feedback);
    }

    // -------------------------------------------------------------------------
    // Consider
    // -------------------------------------------------------------------------

    /// Background attention: revisit a concept chosen by priority, then
    /// decay it.
    fn consider(&mut self) {
        let Some(mut concept) = self.memory.random_concept(&mut self.rng) else {
            return;
        };
        let mut hops = 0;
        while !concept.is_sentence_concept() {
            if hops == CONSIDER_MAX_HOPS {
                return;
            }
            match self.memory.follow_link(concept, LinkKind::Term, &mut self.rng) {
                Some(next) => concept = next,
                None => return,
            }
            hops += 1;
        }

        let term = concept.term().clone();
        let belief = concept.beliefs().peek().cloned();
        let desire = concept.desires().peek().cloned();

        let mut derived = Vec::new();
        if let Some(belief) = belief {
            derived.extend(self.semantic_inference(&belief));
        }
        if let Some(desire) = desire {
            derived.extend(self.pursue_goal(&desire));
        }
        self.memory.decay(&term, self.config.priority_decay_value);
        self.enqueue_derived(derived);
    }

    // -------------------------------------------------------------------------
    // Snapshots
    // -------------------------------------------------------------------------

    /// Every stored belief and desire.
    #[must_use]
    pub fn snapshot(&self) -> BeliefSnapshot {
        let entry = |s: &Sentence| SnapshotEntry {
            statement: s.statement().to_string(),
            kind: s.kind(),
            occurrence_time: s.occurrence_time(),
            intervals: s.statement().interval_layout(),
        };
        let mut snapshot = BeliefSnapshot {
            cycle: self.cycle,
            ..BeliefSnapshot::default()
        };
        for concept in self.memory.concepts() {
            snapshot.beliefs.extend(concept.beliefs().iter().map(entry));
            snapshot.desires.extend(concept.desires().iter().map(entry));
        }
        snapshot
    }

    /// Load a snapshot's beliefs and desires into their concepts.
    ///
    /// Every entry is parsed before anything is stored, so a bad entry
    /// leaves the engine unchanged. Returns the number of entries loaded.
    pub fn restore(&mut self, snapshot: &BeliefSnapshot) -> Result<usize, NarsError> {
        let mut parsed = Vec::with_capacity(snapshot.len());
        for entry in snapshot.beliefs.iter().chain(&snapshot.desires) {
            let mut statement = parse_term(&entry.statement)?;
            if !entry.intervals.is_empty() {
                statement = statement
                    .with_interval_layout(&entry.intervals)
                    .ok_or_else(|| {
                        NarsError::DeserializationError(format!(
                            "interval layout {:?} does not fit '{}'",
                            entry.intervals, statement
                        ))
                    })?;
            }
            if !statement.is_sentence_term() {
                return Err(NarsError::DeserializationError(format!(
                    "'{}' cannot head a sentence",
                    statement
                )));
            }
            parsed.push((statement, entry.kind, entry.occurrence_time));
        }

        self.cycle = self.cycle.max(snapshot.cycle);
        let count = parsed.len();
        for (statement, kind, occurrence_time) in parsed {
            if !self.memory.conceptualize(&statement, &mut self.rng) {
                continue;
            }
            let sentence = Sentence::new(statement, kind, self.ids.next_id(), occurrence_time);
            let ctx = InferenceContext::new(&self.config, &mut self.ids, self.cycle);
            let Some(concept) = self.memory.concept_mut(sentence.statement()) else {
                continue;
            };
            match kind {
                SentenceKind::Goal(_) => concept.desires_mut().insert(sentence, &ctx),
                _ => concept.beliefs_mut().insert(sentence, &ctx),
            }
        }
        debug!(cycle = self.cycle, count, "snapshot restored");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct RecordingActuator {
        commands: Vec<String>,
    }

    impl Actuator for RecordingActuator {
        fn send_motor_command(&mut self, operation: &Term) {
            self.commands.push(operation.to_string());
        }
    }

    fn config() -> NarsConfig {
        NarsConfig {
            consider_per_cycle: 0,
            ..NarsConfig::seeded(7)
        }
    }

    fn engine() -> Engine<RecordingActuator> {
        Engine::new(config(), RecordingActuator::default()).expect("engine")
    }

    fn term(text: &str) -> Term {
        parse_term(text).expect("term")
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = NarsConfig {
            table_capacity: 0,
            ..NarsConfig::default()
        };
        assert!(matches!(
            Engine::with_config(config),
            Err(NarsError::InvalidConfig(_))
        ));
    }

    #[test]
    fn syntax_error_leaves_engine_untouched() {
        let mut engine = engine();
        assert!(matches!(engine.submit("(bird --> "), Err(NarsError::Syntax(_))));
        assert_eq!(engine.buffered(), 0);
        let id = engine.submit("(bird --> animal).").expect("submit");
        assert_eq!(id, SentenceId(0));
        assert_eq!(engine.buffered(), 1);
    }

    #[test]
    fn step_drains_input_into_concepts() {
        let mut engine = engine();
        engine.submit("(bird --> animal). %0.8;0.7%").expect("submit");
        engine.step();
        assert_eq!(engine.cycle(), 1);
        assert_eq!(engine.buffered(), 0);
        let belief = engine.best_belief(&term("(bird --> animal)")).expect("belief");
        let value = belief.value().expect("value");
        assert!((value.frequency() - 0.8).abs() < 1e-12);
        assert!(engine.memory().concept(&term("bird")).is_some());
    }

    #[test]
    fn opposite_evidence_is_revised() {
        let mut engine = engine();
        engine.submit("(bird --> animal). %1.0;0.9%").expect("submit");
        engine.submit("(bird --> animal). %0.0;0.9%").expect("submit");
        engine.step();
        let concept = engine.memory().concept(&term("(bird --> animal)")).expect("concept");
        assert_eq!(concept.beliefs().len(), 1);
        let value = concept.beliefs().peek().and_then(Sentence::value).expect("value");
        assert!(value.confidence() > 0.9);
        assert!(value.frequency() > 0.0 && value.frequency() < 1.0);
    }

    #[test]
    fn question_is_answered_once_per_submission() {
        let mut engine = engine();
        engine.submit("(cat --> pet)?").expect("submit");
        engine.step();
        assert!(engine.drain_events().is_empty());

        engine.submit("(cat --> pet). %1.0;0.9%").expect("submit");
        engine.step();
        engine.submit("(cat --> pet)?").expect("submit");
        engine.run_cycles(3);
        let events = engine.drain_events();
        let answers: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, EngineEvent::Answer { .. }))
            .collect();
        assert_eq!(answers.len(), 1);
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn undesirable_goal_never_acts() {
        let mut engine = engine();
        engine.submit("((*,{SELF}) --> ^stay)! %0.0;0.9%").expect("submit");
        engine.run_cycles(5);
        assert!(engine.actuator().commands.is_empty());
    }

    #[test]
    fn desirable_operation_goal_acts_once() {
        let mut engine = engine();
        engine.submit("((*,{SELF}) --> ^go)! %1.0;0.9%").expect("submit");
        engine.run_cycles(5);
        assert_eq!(engine.actuator().commands, vec!["((*,{SELF}) --> ^go)".to_string()]);
        let executed = engine
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, EngineEvent::Executed { .. }))
            .count();
        assert_eq!(executed, 1);
        // the execution is observed as an event
        let feedback = engine.best_belief(&term("((*,{SELF}) --> ^go)")).expect("feedback");
        assert!(feedback.is_event());
    }

    #[test]
    fn revisited_goal_is_not_acted_again() {
        let mut engine =
            Engine::new(NarsConfig::seeded(7), RecordingActuator::default()).expect("engine");
        engine.submit("((*,{SELF}) --> ^go)! %1.0;0.9%").expect("submit");
        engine.run_cycles(20);
        assert_eq!(engine.actuator().commands, vec!["((*,{SELF}) --> ^go)".to_string()]);
    }

    #[test]
    fn resubmitted_goal_acts_again() {
        let mut engine = engine();
        engine.submit("((*,{SELF}) --> ^go)! %1.0;0.9%").expect("submit");
        engine.run_cycles(3);
        engine.submit("((*,{SELF}) --> ^go)! %1.0;0.9%").expect("submit");
        engine.run_cycles(3);
        assert_eq!(engine.actuator().commands.len(), 2);
    }

    #[test]
    fn chained_goal_acts_once_under_background_attention() {
        let mut engine =
            Engine::new(NarsConfig::seeded(7), RecordingActuator::default()).expect("engine");
        engine
            .submit("(((*,{SELF}) --> ^eat) =/> (food --> eaten)).")
            .expect("submit");
        engine.submit("(food --> eaten)!").expect("submit");
        engine.run_cycles(20);
        assert_eq!(engine.actuator().commands, vec!["((*,{SELF}) --> ^eat)".to_string()]);
    }

    #[test]
    fn goal_chains_to_operation() {
        let mut engine = engine();
        engine
            .submit("(((*,{SELF}) --> ^eat) =/> (food --> eaten)).")
            .expect("submit");
        engine.submit("(food --> eaten)!").expect("submit");
        engine.run_cycles(5);
        assert_eq!(engine.actuator().commands, vec!["((*,{SELF}) --> ^eat)".to_string()]);
    }

    #[test]
    fn compound_operation_respects_intervals() {
        let mut engine = engine();
        engine
            .submit("(&/,((*,{SELF}) --> ^left),2,((*,{SELF}) --> ^right))!")
            .expect("submit");
        engine.step();
        assert_eq!(engine.actuator().commands, vec!["((*,{SELF}) --> ^left)".to_string()]);
        assert_eq!(engine.pending_operations(), 1);
        engine.run_cycles(2);
        assert_eq!(engine.actuator().commands.len(), 2);
        assert_eq!(engine.actuator().commands[1], "((*,{SELF}) --> ^right)");
        assert_eq!(engine.pending_operations(), 0);
    }

    #[test]
    fn temporal_chaining_links_events() {
        let mut engine = Engine::with_config(NarsConfig {
            temporal_chaining: true,
            ..config()
        })
        .expect("engine");
        engine.submit("(light --> on). :|:").expect("submit");
        engine.step();
        engine.submit("(room --> bright). :|:").expect("submit");
        engine.run_cycles(2);
        let implication = term("((light --> on) =/> (room --> bright))");
        assert!(engine.memory().concept(&implication).is_some());
    }

    #[test]
    fn snapshot_restores_into_fresh_engine() {
        let mut engine = engine();
        engine.submit("(bird --> animal). %0.8;0.7%").expect("submit");
        engine.submit("(door --> open)! %1.0;0.9%").expect("submit");
        engine.step();
        let snapshot = engine.snapshot();
        assert!(!snapshot.beliefs.is_empty());
        assert_eq!(snapshot.desires.len(), 1);

        let mut fresh = Engine::with_config(config()).expect("engine");
        let loaded = fresh.restore(&snapshot).expect("restore");
        assert_eq!(loaded, snapshot.len());
        assert_eq!(fresh.cycle(), 1);
        let belief = fresh.best_belief(&term("(bird --> animal)")).expect("belief");
        assert!((belief.value().expect("value").confidence() - 0.7).abs() < 1e-12);
    }

    #[test]
    fn snapshot_keeps_sequence_intervals() {
        let mut engine = engine();
        engine
            .submit("(&/,(door --> open),5,(room --> lit))! %1.0;0.9%")
            .expect("submit");
        engine.step();
        let snapshot = engine.snapshot();

        let mut fresh = Engine::with_config(config()).expect("engine");
        fresh.restore(&snapshot).expect("restore");
        let sequence = term("(&/,(door --> open),(room --> lit))");
        let desire = fresh
            .memory()
            .concept(&sequence)
            .and_then(|c| c.desires().peek())
            .expect("desire");
        let stored = desire.statement().as_compound().expect("compound");
        assert_eq!(stored.intervals(), &[5]);
    }

    #[test]
    fn mismatched_interval_layout_is_rejected() {
        let mut engine = engine();
        let snapshot = BeliefSnapshot {
            cycle: 1,
            beliefs: vec![SnapshotEntry {
                statement: "(bird --> animal)".to_string(),
                kind: SentenceKind::Judgment(EvidentialValue::default()),
                occurrence_time: None,
                intervals: vec![0, 4],
            }],
            desires: Vec::new(),
        };
        assert!(matches!(
            engine.restore(&snapshot),
            Err(NarsError::DeserializationError(_))
        ));
        assert!(engine.memory().is_empty());
    }

    #[test]
    fn bad_snapshot_entry_changes_nothing() {
        let mut engine = engine();
        let snapshot = BeliefSnapshot {
            cycle: 3,
            beliefs: vec![SnapshotEntry {
                statement: "(bird -->".to_string(),
                kind: SentenceKind::Judgment(EvidentialValue::default()),
                occurrence_time: None,
                intervals: Vec::new(),
            }],
            desires: Vec::new(),
        };
        assert!(engine.restore(&snapshot).is_err());
        assert!(engine.memory().is_empty());
        assert_eq!(engine.cycle(), 0);
    }

    #[test]
    fn event_display_lines() {
        let event = EngineEvent::Executed {
            operation: "((*,{SELF}) --> ^go)".to_string(),
            desirability: 0.9,
            cycle: 4,
        };
        assert_eq!(event.to_string(), "EXE: ((*,{SELF}) --> ^go) (desirability 0.900, cycle 4)");
    }
}

//! The studio itself: one run's state, the event loop, and crew behavior.
//!
//! A [`Studio`] owns everything a run needs: the event queue, the virtual
//! clock, the budget book, the crew's mood, the language-model backend,
//! and the artifact sinks. [`Studio::run`] expands the calendar and then
//! drains the queue in timestamp order, pacing each event against the
//! wall clock and dispatching its action.
//!
//! Dispatch is a `match` over the closed [`EventAction`] set. Crew turns
//! call the language model, post their cost to the budget book, and may
//! schedule follow-up events; ambient events mutate morale and fatigue
//! through the transition functions in `bullpen-agents`.
//!
//! The loop is fail-fast: the first collaborator error propagates out and
//! aborts the run. A budget overrun is not an error. It drops the queue,
//! blocks new scheduling, and lets the run wind down with a halt notice
//! as the final row of the timeline.

use std::fmt;
use std::path::Path;

use bullpen_agents::{Fatigue, Morale, fatigue, morale};
use bullpen_artifacts::{RunLog, SandboxRunner, Workspace, WriteMode};
use bullpen_ledger::{BudgetBook, ChargeOutcome};
use bullpen_llm::{
    ChatBackend, Completion, PromptEngine, RenderedPrompt, create_backend, extract_code_block,
};
use bullpen_types::{AgentKind, LogKind, RunId, SimHours};
use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::calendar;
use crate::clock::WorkClock;
use crate::config::StudioConfig;
use crate::error::StudioError;
use crate::event::{Event, EventAction, EventQueue};
use crate::pacer::Pacer;

/// Timeline notice written when the budget ceiling is crossed.
const HALT_NOTICE: &str = "Budget exceeded, halting the studio";

/// Relative path the developer writes the generated program to.
const PROGRAM_PATH: &str = "src/hello.py";

/// Relative path QA writes the full sandbox report to.
const REPORT_PATH: &str = "qa/test_log.txt";

/// Simulated hours between the manager's plan and the developer's turn.
const DEV_DELAY_HOURS: f64 = 0.1;

/// Simulated hours between the manager's plan and QA's turn.
const QA_DELAY_HOURS: f64 = 0.2;

/// Why the run loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Every scheduled event was executed.
    QueueDrained,
    /// The next event lay beyond the horizon and was discarded.
    HorizonReached,
    /// The budget book halted the studio and the queue was dropped.
    BudgetHalted,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::QueueDrained => "queue drained",
            Self::HorizonReached => "horizon reached",
            Self::BudgetHalted => "budget halted",
        };
        f.write_str(label)
    }
}

/// What a finished run looked like.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// The run's identity, as stamped in the artifact headers.
    pub run_id: RunId,
    /// Why the loop stopped.
    pub end_reason: EndReason,
    /// How many events were executed.
    pub events_executed: u64,
    /// Simulated time when the run stopped.
    pub final_time: SimHours,
    /// Crew morale at the end of the run.
    pub final_morale: f64,
    /// Crew fatigue at the end of the run.
    pub final_fatigue: f64,
    /// Total dollars spent on language-model calls.
    pub total_spent: Decimal,
}

/// One run's worth of studio state and collaborators.
pub struct Studio {
    config: StudioConfig,
    brief: String,
    run_id: RunId,
    clock: WorkClock,
    queue: EventQueue,
    book: BudgetBook,
    morale: Morale,
    fatigue: Fatigue,
    rng: SmallRng,
    backend: ChatBackend,
    prompts: PromptEngine,
    log: RunLog,
    workspace: Workspace,
    sandbox: SandboxRunner,
    events_executed: u64,
    halt_notice_pending: bool,
}

impl Studio {
    /// Assemble a studio for one run.
    ///
    /// `out_root` must already exist; every artifact of the run (timeline,
    /// gossip log, generated program, QA report) is created inside it.
    /// `api_key` is required exactly when the configuration is not
    /// offline. The configuration is assumed validated.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::Llm`] when the backend or prompt engine
    /// cannot be built, [`StudioError::Artifact`] when the log files
    /// cannot be created, or [`StudioError::Budget`] for a ceiling the
    /// book refuses.
    pub async fn launch(
        brief: String,
        config: StudioConfig,
        out_root: &Path,
        api_key: Option<String>,
    ) -> Result<Self, StudioError> {
        let run_id = RunId::new();
        let started = Utc::now();

        let backend = create_backend(&config.llm, api_key)?;
        let prompts = PromptEngine::new(config.llm.templates_dir.as_deref())?;
        let log = RunLog::create(out_root, run_id, started).await?;
        let workspace = Workspace::new(out_root);
        let sandbox = SandboxRunner::new(config.skip_sandbox);

        let book = BudgetBook::new(config.budget)?;
        let morale = Morale::starting(&config.mood);
        let fatigue = Fatigue::rested(config.fatigue_cap());
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        info!(
            run = %run_id,
            backend = backend.name(),
            days = config.days,
            budget = %config.budget,
            out = %out_root.display(),
            "Studio assembled"
        );

        Ok(Self {
            config,
            brief,
            run_id,
            clock: WorkClock::new(),
            queue: EventQueue::default(),
            book,
            morale,
            fatigue,
            rng,
            backend,
            prompts,
            log,
            workspace,
            sandbox,
            events_executed: 0,
            halt_notice_pending: false,
        })
    }

    /// Where the timeline artifact lives.
    #[must_use]
    pub fn timeline_path(&self) -> &Path {
        self.log.timeline_path()
    }

    /// Where the gossip artifact lives.
    #[must_use]
    pub fn gossip_path(&self) -> &Path {
        self.log.gossip_path()
    }

    /// Run the studio day to completion.
    ///
    /// Expands the calendar, then loops: pop the earliest event, stop at
    /// the horizon, pace to the event's wall-clock deadline, advance the
    /// clock (accruing fatigue for the elapsed working time), and execute
    /// the action. Actions may schedule follow-ups; a budget halt drops
    /// whatever is still queued and blocks new scheduling.
    ///
    /// # Errors
    ///
    /// Fail-fast: the first collaborator error aborts the whole run.
    pub async fn run(&mut self) -> Result<RunSummary, StudioError> {
        // --- 1. Expand the calendar ---
        calendar::seed(&mut self.queue, &self.config, &mut self.rng)?;
        let horizon = SimHours::new(self.config.total_hours())?;
        let pacer = Pacer::new(self.config.seconds_per_hour);

        info!(
            run = %self.run_id,
            brief = %self.brief,
            scheduled = self.queue.len(),
            horizon = %horizon,
            "Workday starting"
        );

        // --- 2. Drain the queue in timestamp order ---
        let end_reason = loop {
            let Some(event) = self.queue.pop() else {
                break if self.book.is_halted() {
                    EndReason::BudgetHalted
                } else {
                    EndReason::QueueDrained
                };
            };
            if event.time > horizon {
                debug!(time = %event.time, label = %event.label, "Event beyond horizon, discarded");
                break EndReason::HorizonReached;
            }

            pacer.pace_until(event.time).await;
            self.advance_clock(event.time);

            debug!(time = %event.time, label = %event.label, "Executing event");
            self.dispatch(event).await?;
            self.events_executed = self.events_executed.saturating_add(1);

            // The halt notice goes in after the triggering action has
            // fully finished, so it is the last business row of the
            // timeline.
            if self.halt_notice_pending {
                self.halt_notice_pending = false;
                self.record(LogKind::Info, HALT_NOTICE).await?;
            }
        };

        // --- 3. Close out ---
        let summary = self.summarize(end_reason);
        log_run_end(&summary);
        Ok(summary)
    }

    /// Advance simulated time, accruing fatigue for the hours worked.
    fn advance_clock(&mut self, to: SimHours) {
        let elapsed = self.clock.advance(to);
        if elapsed > 0.0 {
            fatigue::accrue(&mut self.fatigue, elapsed, &self.config.mood);
        }
    }

    /// Execute one event's action.
    async fn dispatch(&mut self, event: Event) -> Result<(), StudioError> {
        match event.action {
            EventAction::Crew(AgentKind::Manager) => self.manager_turn().await,
            EventAction::Crew(AgentKind::Developer) => self.developer_turn().await,
            EventAction::Crew(AgentKind::Qa) => self.qa_turn().await,
            EventAction::Gossip(speaker) => self.gossip_turn(speaker).await,
            EventAction::CoffeeBreak => self.coffee_break().await,
            EventAction::TeamMeeting => self.team_meeting().await,
            EventAction::LunchBreak => self.lunch_break().await,
            EventAction::Deadline => {
                self.record(LogKind::Event, "Deadline reached, stopping").await
            }
        }
    }

    /// The manager plans the project and hands out the work.
    async fn manager_turn(&mut self) -> Result<(), StudioError> {
        self.record(LogKind::Info, "Manager: Planning project").await?;

        let prompt = self.prompts.plan_prompt(&self.brief)?;
        let completion = self.ask(AgentKind::Manager, &prompt).await?;
        let plan = completion.text.trim().to_owned();
        self.record(LogKind::Info, &format!("Project plan: {plan}")).await?;

        self.schedule(
            DEV_DELAY_HOURS,
            EventAction::Crew(AgentKind::Developer),
            "Dev writes hello",
        )?;
        self.schedule(QA_DELAY_HOURS, EventAction::Crew(AgentKind::Qa), "QA run")?;
        Ok(())
    }

    /// The developer asks for a program and files it in the workspace.
    async fn developer_turn(&mut self) -> Result<(), StudioError> {
        let name = AgentKind::Developer.display_name();
        self.record(LogKind::Info, &format!("{name}: Writing hello.py")).await?;

        let prompt = self.prompts.build_prompt(&self.brief)?;
        let completion = self.ask(AgentKind::Developer, &prompt).await?;
        let code = extract_code_block(&completion.text).to_owned();

        let written = self
            .workspace
            .write(Path::new(PROGRAM_PATH), &code, WriteMode::Create)
            .await?;
        debug!(path = %written.display(), bytes = code.len(), "Program filed");
        Ok(())
    }

    /// QA runs the sandbox check over the workspace and files the report.
    async fn qa_turn(&mut self) -> Result<(), StudioError> {
        let name = AgentKind::Qa.display_name();
        self.record(LogKind::Info, &format!("{name}: Running tests in Docker")).await?;

        let report = self.sandbox.run_check(self.workspace.root()).await?;
        let verdict = if report.trim().ends_with("PASS") {
            "PASS"
        } else {
            "FAIL"
        };
        self.record(LogKind::Info, &format!("{name}: Syntax check {verdict}")).await?;

        self.workspace
            .write(Path::new(REPORT_PATH), &report, WriteMode::Create)
            .await?;
        Ok(())
    }

    /// A crew member whispers at the kettle; morale takes the hit.
    async fn gossip_turn(&mut self, speaker: AgentKind) -> Result<(), StudioError> {
        let prompt = self.prompts.gossip_prompt(speaker)?;
        let completion = self.ask(speaker, &prompt).await?;
        let line = completion.text.trim().to_owned();

        self.record(LogKind::Gossip, &format!("{speaker} whispers: '{line}'")).await?;

        let sting = morale::apply_gossip(&mut self.morale, &self.config.mood, &mut self.rng);
        debug!(speaker = %speaker, sting, morale = self.morale.value(), "Gossip lands");

        self.log.record_gossip(self.clock.now(), speaker, &line).await?;
        Ok(())
    }

    /// Coffee break: morale up, a little fatigue recovered.
    async fn coffee_break(&mut self) -> Result<(), StudioError> {
        morale::apply_coffee(&mut self.morale, &self.config.mood);
        fatigue::recover(&mut self.fatigue, self.config.mood.coffee_recovery);
        self.record(LogKind::Event, "Coffee break").await
    }

    /// Team meeting: morale down.
    async fn team_meeting(&mut self) -> Result<(), StudioError> {
        morale::apply_meeting(&mut self.morale, &self.config.mood);
        self.record(LogKind::Event, "Team meeting").await
    }

    /// Lunch break: the big fatigue recovery of the day.
    async fn lunch_break(&mut self) -> Result<(), StudioError> {
        fatigue::recover(&mut self.fatigue, self.config.mood.lunch_recovery);
        self.record(LogKind::Event, "Lunch break").await
    }

    /// Ask the model on behalf of a crew member and post the cost.
    ///
    /// The per-call price line is logged before any halt bookkeeping, so
    /// the triggering action's own rows stay ahead of the halt notice.
    async fn ask(
        &mut self,
        agent: AgentKind,
        prompt: &RenderedPrompt,
    ) -> Result<Completion, StudioError> {
        let completion = self.backend.complete(agent.model_id(), prompt).await?;

        let outcome = self.book.charge(self.clock.now(), agent, completion.cost)?;
        let cost = completion.cost;
        let latency = completion.latency.as_secs_f64();
        self.record(LogKind::Info, &format!("{agent} LLM call ${cost:.4} ({latency:.2}s)"))
            .await?;

        if outcome == ChargeOutcome::CeilingCrossed {
            let dropped = self.queue.clear();
            warn!(
                spent = %self.book.total_spent(),
                ceiling = %self.book.ceiling(),
                dropped,
                "Budget ceiling crossed"
            );
            self.halt_notice_pending = true;
        }
        Ok(completion)
    }

    /// Queue a follow-up action `delay_hours` from now.
    ///
    /// A no-op once the budget has halted the studio, so an in-flight
    /// action cannot repopulate the queue after the cutoff.
    fn schedule(
        &mut self,
        delay_hours: f64,
        action: EventAction,
        label: &str,
    ) -> Result<(), StudioError> {
        if self.book.is_halted() {
            debug!(label, "Schedule refused, studio halted");
            return Ok(());
        }
        let delay = SimHours::new(delay_hours)?;
        let time = self.clock.now().plus(delay);
        debug!(time = %time, label, "Scheduling follow-up");
        self.queue.push(Event {
            time,
            action,
            label: label.to_owned(),
        });
        Ok(())
    }

    /// Append one timeline row at the current simulated time, mirroring
    /// it to the structured log.
    async fn record(&mut self, kind: LogKind, message: &str) -> Result<(), StudioError> {
        info!(
            time = %self.clock.now(),
            kind = %kind,
            morale = self.morale.value(),
            cost = %self.book.total_spent(),
            "{message}"
        );
        self.log
            .record(
                self.clock.now(),
                kind,
                message,
                self.morale.value(),
                self.fatigue.value(),
                self.book.total_spent(),
            )
            .await?;
        Ok(())
    }

    fn summarize(&self, end_reason: EndReason) -> RunSummary {
        RunSummary {
            run_id: self.run_id,
            end_reason,
            events_executed: self.events_executed,
            final_time: self.clock.now(),
            final_morale: self.morale.value(),
            final_fatigue: self.fatigue.value(),
            total_spent: self.book.total_spent(),
        }
    }
}

/// Emit the closing structured-log line for a finished run.
fn log_run_end(summary: &RunSummary) {
    info!(
        run = %summary.run_id,
        reason = %summary.end_reason,
        events = summary.events_executed,
        final_time = %summary.final_time,
        morale = summary.final_morale,
        fatigue = summary.final_fatigue,
        spent = %summary.total_spent,
        "Workday over"
    );
}

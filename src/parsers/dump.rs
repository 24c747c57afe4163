use crate::models::{Thread, ThreadDump};
use crate::parsers::builder::ThreadBuilder;
use crate::parsers::line::{LineRecord, SyncVerb, classify_line};
use crate::parsers::registry::LockRegistry;
use crate::parsers::resolver::resolve_anonymous_synchronizers;
use crate::parsers::status::classify_status;
use crate::parsers::timestamp::capture_date_from_filename;

/// Parse one complete thread dump
///
/// `filename` is only used to derive the capture date (see
/// [`capture_date_from_filename`]); pass an empty string when there is none.
///
/// Parsing never fails. Unrecognized lines and unknown lock verbs are logged as warnings,
/// counted in [`ThreadDump::stats`], and skipped.
///
/// # Examples
///
/// ```
/// use thread_dump_analyzer::parse_thread_dump;
/// use thread_dump_analyzer::models::ThreadStatus;
///
/// let text = "\"main\" nid=0x1\n   java.lang.Thread.State: RUNNABLE\n   at App.main(App.java:3)\n";
/// let dump = parse_thread_dump(text, "jstack.1700000000000.txt");
///
/// assert_eq!(dump.threads.len(), 1);
/// assert_eq!(dump.threads[0].status, ThreadStatus::Runnable);
/// assert!(dump.captured_at.is_some());
/// ```
pub fn parse_thread_dump(text: &str, filename: &str) -> ThreadDump {
    let mut parser = DumpParser::new(filename);
    for (line_num, line) in text.lines().enumerate() {
        parser.consume(line_num + 1, line);
    }
    parser.finish()
}

/// Parsing session for a single dump
///
/// Owns the dump under construction, its lock registry, and the current-thread cursor.
/// Nothing here is shared between sessions.
struct DumpParser {
    dump: ThreadDump,
    registry: LockRegistry,
    current: Option<ThreadBuilder>,
    /// Inside the deadlock report; it repeats stacks already recorded and is skipped
    in_deadlock_report: bool,
}

impl DumpParser {
    fn new(filename: &str) -> Self {
        let dump =
            ThreadDump { captured_at: capture_date_from_filename(filename), ..Default::default() };
        Self { dump, registry: LockRegistry::new(), current: None, in_deadlock_report: false }
    }

    fn consume(&mut self, line_num: usize, line: &str) {
        self.dump.stats.total_lines += 1;

        let record = classify_line(line);
        if self.in_deadlock_report && !matches!(record, LineRecord::ThreadHeader(_)) {
            log::debug!("Skipping deadlock report line {}", line_num);
            return;
        }

        match record {
            LineRecord::Banner(banner) => {
                if self.dump.jvm_info.is_none() {
                    self.dump.jvm_info = Some(banner.trim_end_matches(':').to_string());
                }
            }
            LineRecord::DeadlockReport => {
                log::debug!("Deadlock report starts on line {}", line_num);
                self.current = None;
                self.in_deadlock_report = true;
            }
            LineRecord::ThreadHeader(header) => {
                self.in_deadlock_report = false;
                let thread = self.dump.push_thread(Thread::new(header));
                self.current = Some(ThreadBuilder::new(thread));
            }
            LineRecord::StackFrame(frame) => {
                if let Some(current) = self.current_or_skip(line_num) {
                    current.add_frame(&mut self.dump, frame);
                }
            }
            LineRecord::ThreadState(token) => {
                if let Some(current) = self.current_or_skip(line_num) {
                    current.set_status(&mut self.dump, classify_status(token));
                }
            }
            LineRecord::SyncStatus { verb, lock_id, class_name } => {
                if let Some(current) = self.current_or_skip(line_num) {
                    self.apply_sync_status(current, line_num, verb, lock_id, class_name);
                }
            }
            LineRecord::HeldLock { lock_id, class_name } => {
                if let Some(current) = self.current_or_skip(line_num) {
                    let lock = self.registry.fetch_or_create(&mut self.dump, lock_id, class_name);
                    current.acquire_synchronizer(&mut self.dump, lock);
                }
            }
            LineRecord::Ignorable => {}
            LineRecord::Unrecognized => {
                self.dump.stats.unrecognized_lines += 1;
                log::warn!("Unrecognized line {}: {}", line_num, line.trim());
            }
        }
    }

    fn current_or_skip(&self, line_num: usize) -> Option<ThreadBuilder> {
        if self.current.is_none() {
            log::debug!("Ignoring line {} before first thread header", line_num);
        }
        self.current
    }

    fn apply_sync_status(
        &mut self,
        current: ThreadBuilder,
        line_num: usize,
        verb: SyncVerb<'_>,
        lock_id: &str,
        class_name: Option<&str>,
    ) {
        if let SyncVerb::Other(other) = verb {
            self.dump.stats.unknown_verbs += 1;
            log::warn!("Unknown lock verb \"{}\" on line {} (lock <{}>)", other, line_num, lock_id);
            return;
        }

        if verb == SyncVerb::Eliminated {
            return;
        }

        let Some(class_name) = class_name else {
            log::debug!("No lock object named on line {} (<{}>)", line_num, lock_id);
            return;
        };

        if verb.is_wait() {
            let lock = self.registry.fetch_or_create(&mut self.dump, lock_id, class_name);
            current.wait_on(&mut self.dump, lock);
            return;
        }

        // `locked` right after `waiting on` the same monitor is the monitor released by wait()
        if let Some(target) = current.waiting_on(&self.dump)
            && self.dump.lock(target).id == lock_id
        {
            return;
        }

        let lock = self.registry.fetch_or_create(&mut self.dump, lock_id, class_name);
        current.acquire_monitor(&mut self.dump, lock);
    }

    fn finish(mut self) -> ThreadDump {
        self.dump.stats.inferred_waits = resolve_anonymous_synchronizers(&mut self.dump);

        log::info!(
            "Parsed thread dump: {} threads, {} locks ({} unrecognized lines, {} inferred waits)",
            self.dump.threads.len(),
            self.dump.locks.len(),
            self.dump.stats.unrecognized_lines,
            self.dump.stats.inferred_waits
        );

        self.dump
    }
}

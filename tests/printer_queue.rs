// Printer queue state machine: progress bounds, totals and event ordering

use spooler_rs::printer::DEFAULT_SHEETS_PER_MINUTE;
use spooler_rs::sink::EventLog;
use spooler_rs::{JobFactory, Printer, PrinterState, SimEvent, SimTime};

#[test]
fn test_single_job_started_then_finished() {
    let mut jobs = JobFactory::new();
    let mut log = EventLog::new();
    let mut printer = Printer::new(0, DEFAULT_SHEETS_PER_MINUTE);
    let job = jobs.create(3).unwrap();
    printer.enqueue(job.clone(), SimTime::from_secs(0), &mut log);

    // 3 sheets at 8571ms each are out after 25.713s, so the first whole second is 26
    for second in 1..=25 {
        printer.tick(SimTime::from_secs(second), &mut log);
        assert!(printer.pages_printed_of_current() <= 3);
        assert_eq!(printer.state(), PrinterState::Printing);
    }
    assert_eq!(printer.pages_printed_of_current(), 2);
    printer.tick(SimTime::from_secs(26), &mut log);
    assert_eq!(printer.state(), PrinterState::Idle);

    assert_eq!(
        log.events,
        vec![
            SimEvent::JobQueued { at: SimTime::from_secs(0), printer: 0, job: job.clone() },
            SimEvent::JobStarted { at: SimTime::from_secs(0), printer: 0, job: job.clone() },
            SimEvent::JobFinished { at: SimTime::from_secs(26), printer: 0, job },
        ]
    );
    assert_eq!(printer.pages_printed_total(), 3);
}

#[test]
fn test_progress_never_exceeds_head_job() {
    let mut jobs = JobFactory::new();
    let mut log = EventLog::new();
    let mut printer = Printer::new(0, DEFAULT_SHEETS_PER_MINUTE);
    printer.enqueue(jobs.create(2).unwrap(), SimTime::from_secs(0), &mut log);
    printer.enqueue(jobs.create(50).unwrap(), SimTime::from_secs(0), &mut log);

    for second in 1..=600 {
        printer.tick(SimTime::from_secs(second), &mut log);
        if let Some(head) = printer.current_job() {
            assert!(printer.pages_printed_of_current() <= head.pages());
        }
    }
}

#[test]
fn test_total_remaining_only_drops_between_enqueues() {
    let mut jobs = JobFactory::new();
    let mut log = EventLog::new();
    let mut printer = Printer::new(0, DEFAULT_SHEETS_PER_MINUTE);
    assert_eq!(printer.total_pages_remaining(), 0);

    printer.enqueue(jobs.create(20).unwrap(), SimTime::from_secs(0), &mut log);
    assert_eq!(printer.total_pages_remaining(), 20);
    printer.enqueue(jobs.create(15).unwrap(), SimTime::from_secs(0), &mut log);
    assert_eq!(printer.total_pages_remaining(), 35);

    let mut previous = printer.total_pages_remaining();
    for second in 1..=120 {
        printer.tick(SimTime::from_secs(second), &mut log);
        let now = printer.total_pages_remaining();
        assert!(now <= previous, "total went up from {previous} to {now} at {second}s");
        previous = now;
    }

    // Busy printer: an enqueue adds exactly the job's pages
    printer.enqueue(jobs.create(10).unwrap(), SimTime::from_secs(120), &mut log);
    assert_eq!(printer.total_pages_remaining(), previous + 10);
}

#[test]
fn test_next_job_starts_on_completion_tick() {
    let mut jobs = JobFactory::new();
    let mut log = EventLog::new();
    let mut printer = Printer::new(2, 60);
    let first = jobs.create(5).unwrap();
    let second = jobs.create(4).unwrap();
    printer.enqueue(first.clone(), SimTime::from_secs(0), &mut log);
    printer.enqueue(second.clone(), SimTime::from_secs(1), &mut log);

    assert_eq!(printer.queue_len(), 2);
    printer.tick(SimTime::from_secs(2), &mut log);
    assert_eq!(printer.pages_left(), 3);
    for s in 3..=5 {
        printer.tick(SimTime::from_secs(s), &mut log);
    }
    assert_eq!(printer.queue_len(), 1);
    assert_eq!(printer.pages_left(), 4);
    assert_eq!(printer.current_job(), Some(&second));
    assert_eq!(printer.pages_printed_of_current(), 0);
    assert_eq!(printer.total_pages_remaining(), 4);

    let tail: Vec<&SimEvent> = log.events.iter().rev().take(2).collect();
    assert_eq!(
        tail,
        vec![
            &SimEvent::JobStarted { at: SimTime::from_secs(5), printer: 2, job: second },
            &SimEvent::JobFinished { at: SimTime::from_secs(5), printer: 2, job: first },
        ]
    );
}

#[test]
fn test_drain_leaves_printer_idle() {
    let mut jobs = JobFactory::new();
    let mut log = EventLog::new();
    let mut printer = Printer::new(0, 60);
    printer.enqueue(jobs.create(8).unwrap(), SimTime::from_secs(0), &mut log);
    printer.enqueue(jobs.create(3).unwrap(), SimTime::from_secs(0), &mut log);
    printer.tick(SimTime::from_secs(5), &mut log);

    let remaining = printer.drain_remaining_jobs_for_report();
    let left: Vec<u32> = remaining.iter().map(|r| r.pages_remaining).collect();
    assert_eq!(left, vec![3, 3]);
    assert!(printer.has_no_jobs());
    assert_eq!(printer.queue_len(), 0);
    assert_eq!(printer.pages_left(), 0);
    assert!(!printer.is_printing());
    assert!(printer.drain_remaining_jobs_for_report().is_empty());
}

use criterion::{Criterion, criterion_group, criterion_main};
use paredit_engine::editing::{Command, RopeEditor, SelectionSpan, TextEditor, apply_grouped};
use paredit_engine::{MemoryClipboard, Operation, Session, StructuralEdit};
mod common;

fn bench_buffer_editor(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_editor");
    group.sample_size(10);

    let content = common::generate_lisp_source(100);
    let editor = RopeEditor::new("clojure", &content);

    group.bench_function("apply_grouped_batch", |b| {
        let mut e = editor.clone();
        b.iter(|| {
            let commands = [
                Command::Insert {
                    start: std::hint::black_box(50),
                    text: "(".to_string(),
                },
                Command::Delete {
                    start: std::hint::black_box(50),
                    length: 1,
                },
            ];
            let applied = apply_grouped(&mut e, &commands);
            std::hint::black_box(applied)
        });
    });

    group.finish();
}

fn bench_session_commands(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");
    group.sample_size(10);

    let content = common::generate_lisp_source(100);

    group.bench_function("slurp_then_barf", |b| {
        let mut session = Session::new();
        let mut clipboard = MemoryClipboard::new();
        let mut editor = RopeEditor::new("clojure", &content);
        b.iter(|| {
            // inside `(:params req)` on the first line
            editor.set_selection(SelectionSpan::collapsed(37));
            for edit in [
                StructuralEdit::Slurp { backward: false },
                StructuralEdit::Barf { backward: false },
            ] {
                let outcome = session.run(Operation::Edit(edit), &mut editor, &mut clipboard);
                std::hint::black_box(outcome).ok();
            }
        });
    });

    group.bench_function("expand_selection", |b| {
        let mut session = Session::new();
        let mut clipboard = MemoryClipboard::new();
        let mut editor = RopeEditor::new("clojure", &content);
        b.iter(|| {
            editor.set_selection(SelectionSpan::collapsed(40));
            let outcome = session.run(Operation::ExpandSelection, &mut editor, &mut clipboard);
            std::hint::black_box(outcome).ok();
        });
    });

    group.finish();
}

criterion_group!(benches, bench_buffer_editor, bench_session_commands);
criterion_main!(benches);

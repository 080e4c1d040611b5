//! `Machine_Common.h` / `Machine_Common.c` — the shared ringlet runtime.
//!
//! Machine-independent: every generated machine struct shares the same
//! leading layout as `struct LLFSMachine`, and every state struct shares
//! the function-pointer prefix of `struct LLFSMState`, so the runtime
//! drives any machine through pointer casts wired by the per-machine
//! init functions.

use crate::output::Artifact;
use crate::sourcery::{SourceFile, C_TOOL_LINE};

pub(super) fn header() -> Artifact {
    let mut s = SourceFile::with_banner("Machine_Common.h", C_TOOL_LINE);
    s.fragment(
        r#"#ifndef LLFSM_MACHINE_COMMON_H
#define LLFSM_MACHINE_COMMON_H

#include <inttypes.h>
#include <stdbool.h>

#ifndef GET_TIME
#define GET_TIME() (machine->state_time + 1)
#endif
#ifndef TAKE_SNAPSHOT
#define TAKE_SNAPSHOT()
#endif

struct LLFSMachine;

/// A generic LLFSM state: the function-pointer prefix shared by every
/// generated state struct.
struct LLFSMState
{
    struct LLFSMState *(*check_transitions)(const struct LLFSMachine *, const struct LLFSMState *);
    void (*on_entry)(struct LLFSMachine *, struct LLFSMState *);
    void (*on_exit) (struct LLFSMachine *, struct LLFSMState *);
    void (*internal)(struct LLFSMachine *, struct LLFSMState *);
    void (*on_suspend)(struct LLFSMachine *, struct LLFSMState *);
    void (*on_resume) (struct LLFSMachine *, struct LLFSMState *);
};

/// A generic LLFSM: the layout prefix shared by every generated machine
/// struct.
struct LLFSMachine
{
    struct LLFSMState *current_state;
    struct LLFSMState *previous_state;
    uintptr_t          state_time;
    struct LLFSMState *suspend_state;
    struct LLFSMState *resume_state;
    struct LLFSMState * const states[1];
};

/// A generic arrangement of machines: the layout prefix shared by every
/// generated arrangement struct.
struct LLFSMArrangement
{
    uintptr_t number_of_machines;
    struct LLFSMachine *machines[1];
};

/// Execute one ringlet of the given machine.
///
/// - Parameter machine: The machine to execute.
/// - Returns: `true` iff a transition fired.
bool llfsm_execute_ringlet(struct LLFSMachine * const machine);

/// Suspend the given machine (no effect when already suspended or not
/// suspensible).
void llfsm_suspend(struct LLFSMachine * const machine);

/// Resume the given machine (no effect unless suspended).
void llfsm_resume(struct LLFSMachine * const machine);

/// Restart the given machine from its initial state.
void llfsm_restart(struct LLFSMachine * const machine);

/// Suspend every machine of the arrangement except machine 0.
void llfsm_suspend_all(struct LLFSMArrangement * const arrangement);

/// Suspend every machine except machine 0 and the given index.
void llfsm_suspend_all_except(struct LLFSMArrangement * const arrangement, const uintptr_t index);

/// Resume every machine of the arrangement except machine 0.
void llfsm_resume_all(struct LLFSMArrangement * const arrangement);

/// Resume every machine except machine 0 and the given index.
void llfsm_resume_all_except(struct LLFSMArrangement * const arrangement, const uintptr_t index);

/// Restart every machine of the arrangement except machine 0.
void llfsm_restart_all(struct LLFSMArrangement * const arrangement);

/// Restart every machine except machine 0 and the given index.
void llfsm_restart_all_except(struct LLFSMArrangement * const arrangement, const uintptr_t index);

#endif /* LLFSM_MACHINE_COMMON_H */"#,
    );
    Artifact::new("Machine_Common.h", s.render())
}

pub(super) fn source() -> Artifact {
    let mut s = SourceFile::with_banner("Machine_Common.c", C_TOOL_LINE);
    s.fragment(
        r#"#include "Machine_Common.h"

#ifndef NULL
#define NULL ((void*)0)
#endif

/// Execute one ringlet of the given machine.
///
/// A ringlet entered through a new state runs the entry phase first:
/// entering the suspend state fires the suspend action on both the
/// outgoing and entered states, leaving it fires the resume action on
/// both, and onEntry always follows. The transition sequence is then
/// checked in priority order against a single snapshot; on the first
/// match the state exits, otherwise the internal action runs. Exit and
/// internal are mutually exclusive.
///
/// - Parameter machine: The machine to execute.
/// - Returns: `true` iff a transition fired.
bool llfsm_execute_ringlet(struct LLFSMachine * const machine)
{
    struct LLFSMState * const state = machine->current_state;
    struct LLFSMState * const previous = machine->previous_state;
    if (state != previous)
    {
        machine->state_time = GET_TIME();
        machine->previous_state = state;
        if (state == machine->suspend_state)
        {
            if (previous && previous->on_suspend) previous->on_suspend(machine, previous);
            if (state->on_suspend) state->on_suspend(machine, state);
        }
        else if (previous && previous == machine->suspend_state)
        {
            if (previous->on_resume) previous->on_resume(machine, previous);
            if (state->on_resume) state->on_resume(machine, state);
        }
        if (state->on_entry) state->on_entry(machine, state);
    }
    TAKE_SNAPSHOT();
    struct LLFSMState * const target = state->check_transitions
        ? state->check_transitions(machine, state)
        : NULL;
    if (target)
    {
        if (state->on_exit) state->on_exit(machine, state);
        machine->current_state = target;
        return true;
    }
    if (state->internal) state->internal(machine, state);
    return false;
}

/// Suspend the given machine.
///
/// Idempotent: suspending a machine already at its suspend state leaves
/// `resume_state` untouched.
void llfsm_suspend(struct LLFSMachine * const machine)
{
    struct LLFSMState * const suspend = machine->suspend_state;
    if (!suspend || machine->current_state == suspend)
        return;
    machine->resume_state = machine->current_state;
    machine->current_state = suspend;
}

/// Resume the given machine.
///
/// Only effective at the suspend state. Resumes to the recorded resume
/// state, else the last distinct previous state, else state 0.
void llfsm_resume(struct LLFSMachine * const machine)
{
    struct LLFSMState * const suspend = machine->suspend_state;
    if (!suspend || machine->current_state != suspend)
        return;
    struct LLFSMState *resume = machine->resume_state;
    if (!resume && machine->previous_state && machine->previous_state != suspend)
        resume = machine->previous_state;
    if (!resume)
        resume = machine->states[0];
    machine->current_state = resume;
    machine->resume_state = NULL;
}

/// Restart the given machine from its initial state, recording the
/// prior state.
void llfsm_restart(struct LLFSMachine * const machine)
{
    machine->previous_state = machine->current_state;
    machine->current_state = machine->states[0];
}

void llfsm_suspend_all(struct LLFSMArrangement * const arrangement)
{
    for (uintptr_t i = 1; i < arrangement->number_of_machines; i++)
        llfsm_suspend(arrangement->machines[i]);
}

void llfsm_suspend_all_except(struct LLFSMArrangement * const arrangement, const uintptr_t index)
{
    for (uintptr_t i = 1; i < arrangement->number_of_machines; i++)
        if (i != index)
            llfsm_suspend(arrangement->machines[i]);
}

void llfsm_resume_all(struct LLFSMArrangement * const arrangement)
{
    for (uintptr_t i = 1; i < arrangement->number_of_machines; i++)
        llfsm_resume(arrangement->machines[i]);
}

void llfsm_resume_all_except(struct LLFSMArrangement * const arrangement, const uintptr_t index)
{
    for (uintptr_t i = 1; i < arrangement->number_of_machines; i++)
        if (i != index)
            llfsm_resume(arrangement->machines[i]);
}

void llfsm_restart_all(struct LLFSMArrangement * const arrangement)
{
    for (uintptr_t i = 1; i < arrangement->number_of_machines; i++)
        llfsm_restart(arrangement->machines[i]);
}

void llfsm_restart_all_except(struct LLFSMArrangement * const arrangement, const uintptr_t index)
{
    for (uintptr_t i = 1; i < arrangement->number_of_machines; i++)
        if (i != index)
            llfsm_restart(arrangement->machines[i]);
}"#,
    );
    Artifact::new("Machine_Common.c", s.render())
}

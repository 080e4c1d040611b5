//! `State_<S>.h` and `State_<S>.c`.
//!
//! The state source carries the machine-readable markers that the C
//! binding scrapes on load: the per-state transition count define in the
//! header and one `// Transition <i> -> <index>` comment per guard check
//! in the source.

use crate::names::{lower, upper};
use crate::output::Artifact;
use crate::plan::PlannedTransition;
use crate::sourcery::{SourceFile, C_TOOL_LINE};

pub(super) fn header(machine_name: &str, state_name: &str, transition_count: usize) -> Artifact {
    let upper_machine = upper(machine_name);
    let upper_state = upper(state_name);
    let lower_machine = lower(machine_name);
    let lower_state = lower(state_name);
    let mut s = SourceFile::with_banner(&format!("State_{state_name}.h"), C_TOOL_LINE);
    s.line(format!("#ifndef LLFSM_{upper_machine}_{upper_state}_H"));
    s.line(format!("#define LLFSM_{upper_machine}_{upper_state}_H"));
    s.blank();
    s.line("#include <stdbool.h>");
    s.line(format!("#include \"Machine_{machine_name}_Includes.h\""));
    s.line(format!("#include \"State_{state_name}_Includes.h\""));
    s.blank();
    s.line("#ifndef NULL");
    s.line("#define NULL ((void*)0)");
    s.line("#endif");
    s.blank();
    s.line(format!(
        "#define MACHINE_{upper_machine}_{upper_state}_NUMBER_OF_TRANSITIONS {transition_count}"
    ));
    s.blank();
    s.line("#pragma GCC diagnostic push");
    s.line("#pragma GCC diagnostic ignored \"-Wunknown-pragmas\"");
    s.blank();
    s.line("#pragma clang diagnostic push");
    s.line("#pragma clang diagnostic ignored \"-Wvisibility\"");
    s.blank();
    s.line(format!("struct FSM{machine_name}_State_{state_name}"));
    s.line("{");
    s.line("    struct LLFSMState *(*check_transitions)(const struct LLFSMachine *, const struct LLFSMState *);");
    s.line("    void (*on_entry)(struct LLFSMachine *, struct LLFSMState *);");
    s.line("    void (*on_exit) (struct LLFSMachine *, struct LLFSMState *);");
    s.line("    void (*internal)(struct LLFSMachine *, struct LLFSMState *);");
    s.line("    void (*on_suspend)(struct LLFSMachine *, struct LLFSMState *);");
    s.line("    void (*on_resume) (struct LLFSMachine *, struct LLFSMState *);");
    s.blank();
    s.line(format!("#   include \"State_{state_name}_Variables.h\""));
    s.line("};");
    s.blank();
    s.line("/// Initialise the given state.");
    s.line("///");
    s.line("/// - Parameter state: The state to initialise.");
    s.line(format!(
        "void fsm_{lower_machine}_{lower_state}_init(struct FSM{machine_name}_State_{state_name} * const state);"
    ));
    s.blank();
    s.line("/// Validate the given state.");
    s.line("///");
    s.line("/// - Parameter state: The state to initialise.");
    s.line(format!(
        "bool fsm_{lower_machine}_{lower_state}_validate(const struct Machine_{machine_name} * const machine, const struct FSM{machine_name}_State_{state_name} * const state);"
    ));
    s.blank();
    s.line(format!("/// Check the sequence of transitions for {state_name}."));
    s.line("///");
    s.line("/// - Returns: The state the machine transitions to (`NULL` if no transition fired).");
    s.line(format!(
        "struct LLFSMState *fsm_{lower_machine}_{lower_state}_check_transitions(const struct Machine_{machine_name} * const machine, const struct FSM{machine_name}_State_{state_name} * const state);"
    ));
    s.blank();
    for (action, doc) in action_docs(state_name) {
        s.fragment(&doc);
        s.line(format!(
            "void fsm_{lower_machine}_{lower_state}_{action}(struct Machine_{machine_name} * const machine, struct FSM{machine_name}_State_{state_name} * const state);"
        ));
        s.blank();
    }
    s.line("#pragma clang diagnostic pop");
    s.line("#pragma GCC diagnostic pop");
    s.blank();
    s.line(format!("#endif /* LLFSM_{upper_machine}_{upper_state}_H */"));
    Artifact::new(format!("State_{state_name}.h"), s.render())
}

pub(super) fn source(
    machine_name: &str,
    state_name: &str,
    transitions: &[PlannedTransition],
) -> Artifact {
    let lower_machine = lower(machine_name);
    let lower_state = lower(state_name);
    let prefix = format!("fsm_{lower_machine}_{lower_state}");
    let state_struct = format!("FSM{machine_name}_State_{state_name}");
    let mut s = SourceFile::with_banner(&format!("State_{state_name}.c"), C_TOOL_LINE);
    s.line(format!("#include \"Machine_{machine_name}.h\""));
    s.line(format!("#include \"State_{state_name}.h\""));
    s.blank();
    s.line("#pragma GCC diagnostic push");
    s.line("#pragma GCC diagnostic ignored \"-Wunknown-pragmas\"");
    s.line("#pragma GCC diagnostic ignored \"-Wincompatible-pointer-types\"");
    s.blank();
    s.line("#pragma clang diagnostic push");
    s.line("#pragma clang diagnostic ignored \"-Wincompatible-function-pointer-types\"");
    s.line("#pragma clang diagnostic ignored \"-Wcompare-distinct-pointer-types\"");
    s.line("#pragma clang diagnostic ignored \"-Wvisibility\"");
    s.blank();
    s.line(format!("/// Initialise the given {state_name} state."));
    s.line("///");
    s.line("/// - Parameter state: The state to initialise.");
    s.line(format!(
        "void {prefix}_init(struct {state_struct} * const state)"
    ));
    s.line("{");
    s.line(format!(
        "    state->check_transitions = (struct LLFSMState *(*)(const struct LLFSMachine *, const struct LLFSMState *)){prefix}_check_transitions;"
    ));
    s.line(format!(
        "    state->on_entry   = (void (*)(struct LLFSMachine *, struct LLFSMState *)){prefix}_on_entry;"
    ));
    s.line(format!(
        "    state->on_exit    = (void (*)(struct LLFSMachine *, struct LLFSMState *)){prefix}_on_exit;"
    ));
    s.line(format!(
        "    state->internal   = (void (*)(struct LLFSMachine *, struct LLFSMState *)){prefix}_internal;"
    ));
    s.line(format!(
        "    state->on_suspend = (void (*)(struct LLFSMachine *, struct LLFSMState *)){prefix}_on_suspend;"
    ));
    s.line(format!(
        "    state->on_resume  = (void (*)(struct LLFSMachine *, struct LLFSMState *)){prefix}_on_resume;"
    ));
    s.line("}");
    s.blank();
    s.line(format!("/// Check the validity of the given {state_name} state."));
    s.line("///");
    s.line("/// - Parameter state: The state to validate.");
    s.line(format!(
        "bool {prefix}_validate(const struct Machine_{machine_name} * const machine, const struct {state_struct} * const state)"
    ));
    s.line("{");
    s.line("    (void)machine;");
    s.line(format!(
        "    return state->check_transitions == (struct LLFSMState *(*)(const struct LLFSMachine * const machine, const struct LLFSMState * const state)){prefix}_check_transitions &&"
    ));
    s.line(format!(
        "           state->on_entry   == (void (*)(struct LLFSMachine *, struct LLFSMState *)){prefix}_on_entry &&"
    ));
    s.line(format!(
        "           state->on_exit    == (void (*)(struct LLFSMachine *, struct LLFSMState *)){prefix}_on_exit &&"
    ));
    s.line(format!(
        "           state->internal   == (void (*)(struct LLFSMachine *, struct LLFSMState *)){prefix}_internal &&"
    ));
    s.line(format!(
        "           state->on_suspend == (void (*)(struct LLFSMachine *, struct LLFSMState *)){prefix}_on_suspend &&"
    ));
    s.line(format!(
        "           state->on_resume  == (void (*)(struct LLFSMachine *, struct LLFSMState *)){prefix}_on_resume;"
    ));
    s.line("}");
    s.line("#pragma clang diagnostic push");
    s.line("#pragma clang diagnostic ignored \"-Wunused-parameter\"");
    s.blank();
    for (action, doc) in action_docs(state_name) {
        let section = match action {
            "on_entry" => "OnEntry",
            "on_exit" => "OnExit",
            "internal" => "Internal",
            "on_suspend" => "OnSuspend",
            _ => "OnResume",
        };
        s.fragment(&doc);
        s.line(format!(
            "void {prefix}_{action}(struct Machine_{machine_name} * const machine, struct {state_struct} * const state)"
        ));
        s.line("{");
        s.line(format!("#   include \"State_{state_name}_{section}.mm\""));
        s.line("}");
        s.blank();
    }
    s.line(format!("/// Check the sequence of transitions for {state_name}."));
    s.line("///");
    s.line("/// - Parameters:");
    s.line("///   - machine: The machine this function belongs to.");
    s.line("///   - state: The state being resumed.");
    s.line("/// - Returns: The state the machine transitions to (`NULL` if no transition fired).");
    s.line(format!(
        "struct LLFSMState *{prefix}_check_transitions(const struct Machine_{machine_name} * const machine, const struct {state_struct} * const state)"
    ));
    s.line("{");
    for (i, transition) in transitions.iter().enumerate() {
        match transition.target_index {
            Some(target) => {
                s.line(format!("    // Transition {i} -> {target}"));
                s.line("    if (");
                s.line(format!(
                    "        #include \"State_{state_name}_Transition_{i}.expr\""
                ));
                s.line(format!("    ) return machine->states[{target}];"));
            }
            None => {
                s.line(format!("    // Transition {i} -> unresolved (no generated check)"));
            }
        }
    }
    s.line("    return NULL; // None of the transitions fired.");
    s.line("}");
    Artifact::new(format!("State_{state_name}.c"), s.render())
}

/// Doc comment for each of the five action functions, in emission order.
fn action_docs(state_name: &str) -> [(&'static str, String); 5] {
    [
        (
            "on_entry",
            format!(
                "/// The onEntry function for {state_name}.\n///\n/// - Parameters:\n///   - machine: The machine that entered the state.\n///   - state: The state that was entered."
            ),
        ),
        (
            "on_exit",
            format!(
                "/// The onExit function for {state_name}.\n///\n/// - Parameters:\n///   - machine: The machine this function belongs to.\n///   - state: The state being exited."
            ),
        ),
        (
            "internal",
            format!(
                "/// The internal action for {state_name}.\n///\n/// - Parameters:\n///   - machine: The machine this function belongs to.\n///   - state: The state whose internal action to execute."
            ),
        ),
        (
            "on_suspend",
            format!(
                "/// The onSuspend function for {state_name}.\n///\n/// - Parameters:\n///   - machine: The machine that entered the state.\n///   - state: The state that was suspended."
            ),
        ),
        (
            "on_resume",
            format!(
                "/// The onResume function for {state_name}.\n///\n/// - Parameters:\n///   - machine: The machine this function belongs to.\n///   - state: The state being resumed."
            ),
        ),
    ]
}

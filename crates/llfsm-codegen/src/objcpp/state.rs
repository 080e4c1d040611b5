//! `State_<S>.h` and `State_<S>.mm` in the MiCASE shape.
//!
//! Transition metadata is embedded in the header, so `Transition_<i>`
//! numbering, the `_transitions` array, and the `.expr` files must stay
//! contiguous. Edges with unresolved targets are dropped from the
//! emitted sequence (a warning comment marks the gap) and the remaining
//! edges are renumbered in priority order.

use crate::output::Artifact;
use crate::plan::PlannedTransition;
use crate::sourcery::{SourceFile, OBJCPP_TOOL_LINE};

const ACTIONS: [&str; 5] = ["OnEntry", "OnExit", "Internal", "OnSuspend", "OnResume"];

/// The emitted (renumbered) transition sequence: resolved edges only,
/// paired with their target index.
pub(super) fn emitted(transitions: &[PlannedTransition]) -> Vec<(&PlannedTransition, usize)> {
    transitions
        .iter()
        .filter_map(|t| t.target_index.map(|target| (t, target)))
        .collect()
}

pub(super) fn header(
    machine_name: &str,
    state_name: &str,
    transitions: &[PlannedTransition],
) -> Artifact {
    let emitted = emitted(transitions);
    let dropped = transitions.len() - emitted.len();
    let count = emitted.len();
    let mut s = SourceFile::with_banner(&format!("State_{state_name}.h"), OBJCPP_TOOL_LINE);
    s.line(format!("#ifndef clfsm_{machine_name}_State_{state_name}_h"));
    s.line(format!("#define clfsm_{machine_name}_State_{state_name}_h"));
    s.blank();
    s.line("#pragma clang diagnostic push");
    s.line("#pragma clang diagnostic ignored \"-Wc++98-compat\"");
    s.blank();
    s.line("#include \"CLState.h\"");
    s.line("#include \"CLAction.h\"");
    s.line("#include \"CLTransition.h\"");
    s.blank();
    s.line("namespace FSM");
    s.line("{");
    s.line("    namespace CLM");
    s.line("    {");
    s.line(format!("      namespace FSM{machine_name}"));
    s.line("      {");
    s.line("        namespace State");
    s.line("        {");
    s.line(format!("            class {state_name}: public CLState"));
    s.line("            {");
    for action in ACTIONS {
        s.line(format!("                class {action}: public CLAction"));
        s.line("                {");
        s.line("                    virtual void perform(CLMachine *, CLState *) const;");
        s.line("                };");
        s.blank();
    }
    for (i, (_, target)) in emitted.iter().enumerate() {
        s.line(format!("                class Transition_{i}: public CLTransition"));
        s.line("                {");
        s.line("                public:");
        s.line(format!(
            "                    Transition_{i}(int toState = {target}): CLTransition(toState) {{}}"
        ));
        s.blank();
        s.line("                    virtual bool check(CLMachine *, CLState *) const;");
        s.line("                };");
        s.blank();
    }
    if dropped > 0 {
        s.line(format!(
            "                // {dropped} transition(s) with unresolved targets not generated"
        ));
        s.blank();
    }
    if count == 0 {
        s.line("#pragma clang diagnostic push");
        s.line("#pragma clang diagnostic ignored \"-Wzero-length-array\"");
        s.line("                CLTransition *_transitions[0];");
        s.line("#pragma clang diagnostic pop");
    } else {
        s.line(format!("                CLTransition *_transitions[{count}];"));
    }
    s.blank();
    s.line("                public:");
    s.line(format!(
        "                    {state_name}(const char *name = \"{state_name}\");"
    ));
    s.line(format!("                    virtual ~{state_name}();"));
    s.blank();
    s.line("                    virtual CLTransition * const *transitions() const { return _transitions; }");
    s.line(format!(
        "                    virtual int numberOfTransitions() const {{ return {count}; }}"
    ));
    s.blank();
    s.line(format!("#                   include \"State_{state_name}_Variables.h\""));
    s.line(format!("#                   include \"State_{state_name}_Methods.h\""));
    s.line("            };");
    s.line("        }");
    s.line("      }");
    s.line("    }");
    s.line("}");
    s.blank();
    s.line("#endif");
    Artifact::new(format!("State_{state_name}.h"), s.render())
}

pub(super) fn source(
    machine_name: &str,
    state_name: &str,
    transitions: &[PlannedTransition],
) -> Artifact {
    let emitted = emitted(transitions);
    let mut s = SourceFile::with_banner(&format!("State_{state_name}.mm"), OBJCPP_TOOL_LINE);
    s.line(format!("#include \"{machine_name}_Includes.h\""));
    s.line(format!("#include \"{machine_name}.h\""));
    s.line(format!("#include \"State_{state_name}.h\""));
    s.line(format!("#include \"State_{state_name}_Includes.h\""));
    s.blank();
    s.line("using namespace FSM;");
    s.line("using namespace CLM;");
    s.line(format!("using namespace FSM{machine_name};"));
    s.line("using namespace State;");
    s.blank();
    s.line(format!("{state_name}::{state_name}(const char *name): CLState(name, *new {state_name}::OnEntry, *new {state_name}::OnExit, *new {state_name}::Internal, NULLPTR, new {state_name}::OnSuspend, new {state_name}::OnResume)"));
    s.line("{");
    for i in 0..emitted.len() {
        s.line(format!("    _transitions[{i}] = new Transition_{i}();"));
    }
    s.line("}");
    s.blank();
    s.line(format!("{state_name}::~{state_name}()"));
    s.line("{");
    s.line("    delete &onEntryAction();");
    s.line("    delete &onExitAction();");
    s.line("    delete &internalAction();");
    s.line("    delete onSuspendAction();");
    s.line("    delete onResumeAction();");
    s.blank();
    for i in 0..emitted.len() {
        s.line(format!("    delete _transitions[{i}];"));
    }
    s.line("}");
    s.blank();
    for action in ACTIONS {
        s.line(format!(
            "void {state_name}::{action}::perform(CLMachine *_machine, CLState *_state) const"
        ));
        s.line("{");
        s.line(format!("#   include \"State_{state_name}_{action}.mm\""));
        s.line("}");
        s.blank();
    }
    for i in 0..emitted.len() {
        s.line(format!(
            "bool {state_name}::Transition_{i}::check(CLMachine *_machine, CLState *_state) const"
        ));
        s.line("{");
        s.line("    return");
        s.line("    (");
        s.line(format!("#       include \"State_{state_name}_Transition_{i}.expr\""));
        s.line("    );");
        s.line("}");
        s.blank();
    }
    Artifact::new(format!("State_{state_name}.mm"), s.render())
}

//! `Machine_<Name>.h` and `Machine_<Name>.c`.

use llfsm_machine::Machine;

use crate::names::{lower, upper};
use crate::output::Artifact;
use crate::plan::EmissionPlan;
use crate::sourcery::{SourceFile, C_TOOL_LINE};

pub(super) fn header(name: &str, machine: &Machine, plan: &EmissionPlan) -> Artifact {
    let upper_name = upper(name);
    let lower_name = lower(name);
    let suspensible = plan.suspend_index(machine).is_some() as u8;
    let mut s = SourceFile::with_banner(&format!("Machine_{name}.h"), C_TOOL_LINE);
    s.line(format!("#ifndef LLFSM_MACHINE_{upper_name}_H"));
    s.line(format!("#define LLFSM_MACHINE_{upper_name}_H"));
    s.blank();
    s.line("#include <inttypes.h>");
    s.line("#include <stdbool.h>");
    s.line(format!("#include \"Machine_{name}_Includes.h\""));
    s.blank();
    s.line("#ifdef INCLUDE_MACHINE_CUSTOM");
    s.line("#include \"Machine_Custom.h\"");
    s.line("#endif");
    s.blank();
    s.line(format!("#ifdef INCLUDE_MACHINE_{upper_name}_CUSTOM"));
    s.line(format!("#include \"Machine_{name}_Custom.h\""));
    s.line("#endif");
    s.blank();
    s.line("#pragma GCC diagnostic push");
    s.line("#pragma GCC diagnostic ignored \"-Wunknown-pragmas\"");
    s.blank();
    s.line("#pragma clang diagnostic push");
    s.line("#pragma clang diagnostic ignored \"-Wunused-macros\"");
    s.blank();
    s.line(format!(
        "#define MACHINE_{upper_name}_NUMBER_OF_STATES {}",
        plan.number_of_states()
    ));
    s.blank();
    s.line(format!("#define MACHINE_{upper_name}_IS_SUSPENSIBLE {suspensible}"));
    s.blank();
    s.line("#ifndef RESTART");
    s.line("#define RESTART(m) (((m)->previous_state = (m)->current_state) && ((m)->current_state = (m)->states[0]))");
    s.line("#endif");
    s.line("#ifndef GET_TIME");
    s.line("#define GET_TIME() (machine->state_time + 1)");
    s.line("#endif");
    s.line("#ifndef TAKE_SNAPSHOT");
    s.line("#define TAKE_SNAPSHOT()");
    s.line("#endif");
    s.blank();
    s.blank();
    s.line("#pragma GCC diagnostic push");
    s.line("#pragma GCC diagnostic ignored \"-Wunknown-pragmas\"");
    s.blank();
    s.line("#pragma clang diagnostic push");
    s.line("#pragma clang diagnostic ignored \"-Wpadded\"");
    s.blank();
    s.line("struct LLFSMArrangement;");
    s.line("struct LLFSMState;");
    s.line("struct LLFSMachine;");
    s.blank();
    s.line(format!("/// A {name} LLFSM."));
    s.line(format!("struct Machine_{name}"));
    s.line("{");
    s.line("    struct LLFSMState *current_state;");
    s.line("    struct LLFSMState *previous_state;");
    s.line("    uintptr_t          state_time;");
    s.line("    struct LLFSMState *suspend_state;");
    s.line("    struct LLFSMState *resume_state;");
    s.line(format!(
        "    struct LLFSMState * const states[MACHINE_{upper_name}_NUMBER_OF_STATES];"
    ));
    s.blank();
    s.line(format!("#   include \"Machine_{name}_Variables.h\""));
    s.line("};");
    s.blank();
    s.line(format!("/// Initialise a `Machine_{name}` LLFSM."));
    s.line("///");
    s.line("/// - Parameter machine: The LLFSM to initialise.");
    s.line(format!("void fsm_{lower_name}_init(struct Machine_{name} *);"));
    s.blank();
    s.line(format!("/// Validate a `Machine_{name}` LLFSM."));
    s.line("///");
    s.line("/// - Parameter machine: The LLFSM to initialise.");
    s.line(format!("bool fsm_{lower_name}_validate(struct Machine_{name} *);"));
    s.blank();
    s.line("#pragma clang diagnostic pop");
    s.line("#pragma GCC diagnostic pop");
    s.blank();
    s.line(format!("#endif /* LLFSM_MACHINE_{upper_name}_H */"));
    Artifact::new(format!("Machine_{name}.h"), s.render())
}

pub(super) fn source(name: &str, machine: &Machine, plan: &EmissionPlan) -> Artifact {
    let lower_name = lower(name);
    let mut s = SourceFile::with_banner(&format!("Machine_{name}.c"), C_TOOL_LINE);
    s.line(format!("#include \"Machine_{name}.h\""));
    s.blank();
    s.line("#ifndef NULL");
    s.line("#define NULL ((void*)0)");
    s.line("#endif");
    s.blank();
    s.line(format!("/// Initialise an instance of `Machine_{name}."));
    s.line("///");
    s.line("/// - Parameter machine: The machine to initialise.");
    s.line(format!(
        "void fsm_{lower_name}_init(struct Machine_{name} * const machine)"
    ));
    s.line("{");
    s.line("    machine->current_state = machine->states[0];");
    s.line("    machine->previous_state = NULL;");
    s.line("    machine->state_time = 0;");
    match plan.suspend_index(machine) {
        Some(index) => s.line(format!(
            "    machine->suspend_state = machine->states[{index}];"
        )),
        None => s.line("    machine->suspend_state = NULL;"),
    }
    s.line("    machine->resume_state = NULL;");
    s.line("}");
    s.blank();
    s.line(format!("/// Validate an instance of `Machine_{name}."));
    s.line("///");
    s.line("/// - Parameter machine: The machine to validate.");
    s.line("/// - Returns: `true` iff the machine appears valid.");
    s.line(format!(
        "bool fsm_{lower_name}_validate(struct Machine_{name} * const machine)"
    ));
    s.line("{");
    s.line("    return machine->current_state != NULL &&");
    s.line("    true; // FIXME: check states");
    s.line("}");
    Artifact::new(format!("Machine_{name}.c"), s.render())
}

//! `Arrangement_<Name>.h/.c`, the statically allocated variant, and the
//! `static_main.c` driver.
//!
//! The arrangement struct shares the `struct LLFSMArrangement` layout
//! prefix, so the runtime's suspend/resume/restart helpers (which skip
//! machine 0) work on a cast. Each instance also gets a named, typed
//! slot through an anonymous union member.

use llfsm_machine::{Arrangement, MachineArena};

use crate::error::{CodegenError, CodegenResult};
use crate::names::{lower, upper};
use crate::output::Artifact;
use crate::plan::EmissionPlan;
use crate::sourcery::{SourceFile, C_TOOL_LINE};

/// Per-instance data every arrangement emitter needs.
pub(crate) struct InstancePlan {
    /// Resolved arrangement-unique instance name.
    pub name: String,
    /// Machine type name (bundle stem).
    pub type_name: String,
    /// Emitted state names of the type, in index order.
    pub state_names: Vec<String>,
}

pub(crate) fn instance_plans(
    arrangement: &Arrangement,
    arena: &MachineArena,
) -> CodegenResult<Vec<InstancePlan>> {
    let mut plans = Vec::with_capacity(arrangement.instances.len());
    for instance in &arrangement.instances {
        let machine = arena
            .get(instance.machine)
            .ok_or(CodegenError::UnknownHandle(instance.machine))?;
        let plan = EmissionPlan::new(machine);
        plans.push(InstancePlan {
            name: instance.name.clone(),
            type_name: instance.type_name().to_string(),
            state_names: plan.state_names,
        });
    }
    Ok(plans)
}

pub(super) fn header(name: &str, plans: &[InstancePlan]) -> Artifact {
    let upper_name = upper(name);
    let lower_name = lower(name);
    let mut s = SourceFile::with_banner(&format!("Arrangement_{name}.h"), C_TOOL_LINE);
    s.line(format!("#ifndef LLFSM_ARRANGEMENT_{upper_name}_H"));
    s.line(format!("#define LLFSM_ARRANGEMENT_{upper_name}_H"));
    s.blank();
    s.line("#include <inttypes.h>");
    s.line("#include <stdbool.h>");
    s.line("#include \"Machine_Common.h\"");
    for type_name in distinct_types(plans) {
        s.line(format!("#include \"Machine_{type_name}.h\""));
    }
    s.blank();
    s.line(format!(
        "#define ARRANGEMENT_{upper_name}_NUMBER_OF_INSTANCES {}",
        plans.len()
    ));
    for (i, plan) in plans.iter().enumerate() {
        s.line(format!(
            "#define ARRANGEMENT_{upper_name}_{}_INDEX {i}",
            upper(&plan.name)
        ));
    }
    s.blank();
    s.line(format!("/// The {name} arrangement."));
    s.line(format!("struct Arrangement_{name}"));
    s.line("{");
    s.line("    uintptr_t number_of_machines;");
    s.line("    union");
    s.line("    {");
    s.line(format!(
        "        struct LLFSMachine *machines[ARRANGEMENT_{upper_name}_NUMBER_OF_INSTANCES];"
    ));
    s.line("        struct");
    s.line("        {");
    for plan in plans {
        s.line(format!(
            "            struct Machine_{} *fsm_{};",
            plan.type_name,
            lower(&plan.name)
        ));
    }
    s.line("        };");
    s.line("    };");
    s.line("};");
    s.blank();
    s.line(format!("/// Initialise each instance of the {name} arrangement."));
    s.line("///");
    s.line("/// The instance slots must point at allocated machine storage.");
    s.line(format!(
        "void arrangement_{lower_name}_init(struct Arrangement_{name} * const arrangement);"
    ));
    s.blank();
    s.line(format!("/// Validate each instance of the {name} arrangement."));
    s.line("///");
    s.line("/// - Returns: `true` iff every instance validates, visited in declared order.");
    s.line(format!(
        "bool arrangement_{lower_name}_validate(struct Arrangement_{name} * const arrangement);"
    ));
    s.blank();
    s.line("/// Execute one ringlet of every instance, in declared order.");
    s.line(format!(
        "void arrangement_{lower_name}_execute_once(struct Arrangement_{name} * const arrangement);"
    ));
    s.blank();
    for verb in ["suspend", "resume", "restart"] {
        s.line(format!("/// {} every instance except instance 0.", capitalised(verb)));
        s.line(format!(
            "void arrangement_{lower_name}_{verb}_all(struct Arrangement_{name} * const arrangement);"
        ));
        s.blank();
        s.line(format!(
            "/// {} every instance except instance 0 and the given index.",
            capitalised(verb)
        ));
        s.line(format!(
            "void arrangement_{lower_name}_{verb}_all_except(struct Arrangement_{name} * const arrangement, const uintptr_t index);"
        ));
        s.blank();
    }
    s.line(format!("#endif /* LLFSM_ARRANGEMENT_{upper_name}_H */"));
    Artifact::new(format!("Arrangement_{name}.h"), s.render())
}

pub(super) fn source(name: &str, plans: &[InstancePlan]) -> Artifact {
    let lower_name = lower(name);
    let mut s = SourceFile::with_banner(&format!("Arrangement_{name}.c"), C_TOOL_LINE);
    s.line(format!("#include \"Arrangement_{name}.h\""));
    s.blank();
    s.line(format!(
        "void arrangement_{lower_name}_init(struct Arrangement_{name} * const arrangement)"
    ));
    s.line("{");
    s.line(format!(
        "    arrangement->number_of_machines = ARRANGEMENT_{}_NUMBER_OF_INSTANCES;",
        upper(name)
    ));
    for plan in plans {
        s.line(format!(
            "    fsm_{}_init(arrangement->fsm_{});",
            lower(&plan.type_name),
            lower(&plan.name)
        ));
    }
    s.line("}");
    s.blank();
    s.line(format!(
        "bool arrangement_{lower_name}_validate(struct Arrangement_{name} * const arrangement)"
    ));
    s.line("{");
    if plans.is_empty() {
        s.line("    (void)arrangement;");
        s.line("    return true;");
    } else {
        s.line("    return");
        for (i, plan) in plans.iter().enumerate() {
            let terminator = if i + 1 == plans.len() { ";" } else { " &&" };
            s.line(format!(
                "        fsm_{}_validate(arrangement->fsm_{}){terminator}",
                lower(&plan.type_name),
                lower(&plan.name)
            ));
        }
    }
    s.line("}");
    s.blank();
    s.line(format!(
        "void arrangement_{lower_name}_execute_once(struct Arrangement_{name} * const arrangement)"
    ));
    s.line("{");
    s.line("    for (uintptr_t i = 0; i < arrangement->number_of_machines; i++)");
    s.line("        llfsm_execute_ringlet(arrangement->machines[i]);");
    s.line("}");
    s.blank();
    for verb in ["suspend", "resume", "restart"] {
        s.line(format!(
            "void arrangement_{lower_name}_{verb}_all(struct Arrangement_{name} * const arrangement)"
        ));
        s.line("{");
        s.line(format!(
            "    llfsm_{verb}_all((struct LLFSMArrangement *)arrangement);"
        ));
        s.line("}");
        s.blank();
        s.line(format!(
            "void arrangement_{lower_name}_{verb}_all_except(struct Arrangement_{name} * const arrangement, const uintptr_t index)"
        ));
        s.line("{");
        s.line(format!(
            "    llfsm_{verb}_all_except((struct LLFSMArrangement *)arrangement, index);"
        ));
        s.line("}");
        s.blank();
    }
    Artifact::new(format!("Arrangement_{name}.c"), s.render())
}

pub(super) fn static_header(name: &str, _plans: &[InstancePlan]) -> Artifact {
    let upper_name = upper(name);
    let lower_name = lower(name);
    let mut s = SourceFile::with_banner(&format!("Static_Arrangement_{name}.h"), C_TOOL_LINE);
    s.line(format!("#ifndef LLFSM_STATIC_ARRANGEMENT_{upper_name}_H"));
    s.line(format!("#define LLFSM_STATIC_ARRANGEMENT_{upper_name}_H"));
    s.blank();
    s.line(format!("#include \"Arrangement_{name}.h\""));
    s.blank();
    s.line(format!("/// The statically allocated {name} arrangement."));
    s.line(format!(
        "extern struct Arrangement_{name} static_arrangement_{lower_name};"
    ));
    s.blank();
    s.line("/// Wire and initialise the static instances and their states.");
    s.line(format!("void static_arrangement_{lower_name}_init(void);"));
    s.blank();
    s.line(format!("#endif /* LLFSM_STATIC_ARRANGEMENT_{upper_name}_H */"));
    Artifact::new(format!("Static_Arrangement_{name}.h"), s.render())
}

pub(super) fn static_source(name: &str, plans: &[InstancePlan]) -> Artifact {
    let lower_name = lower(name);
    let mut s = SourceFile::with_banner(&format!("Static_Arrangement_{name}.c"), C_TOOL_LINE);
    s.line(format!("#include \"Static_Arrangement_{name}.h\""));
    for type_name in distinct_types(plans) {
        if let Some(plan) = plans.iter().find(|p| p.type_name == type_name) {
            for state_name in &plan.state_names {
                s.line(format!("#include \"State_{state_name}.h\""));
            }
        }
    }
    s.blank();
    for plan in plans {
        let instance = lower(&plan.name);
        for state_name in &plan.state_names {
            s.line(format!(
                "static struct FSM{}_State_{state_name} fsm_{instance}_{};",
                plan.type_name,
                lower(state_name)
            ));
        }
        s.line(format!(
            "static struct Machine_{} fsm_{instance}_storage =",
            plan.type_name
        ));
        s.line("{");
        s.line("    .states =");
        s.line("    {");
        for state_name in &plan.state_names {
            s.line(format!(
                "        (struct LLFSMState *)&fsm_{instance}_{},",
                lower(state_name)
            ));
        }
        s.line("    }");
        s.line("};");
        s.blank();
    }
    s.line(format!(
        "struct Arrangement_{name} static_arrangement_{lower_name} ="
    ));
    s.line("{");
    s.line(format!(
        "    .number_of_machines = ARRANGEMENT_{}_NUMBER_OF_INSTANCES,",
        upper(name)
    ));
    s.line("    .machines =");
    s.line("    {");
    for plan in plans {
        s.line(format!(
            "        (struct LLFSMachine *)&fsm_{}_storage,",
            lower(&plan.name)
        ));
    }
    s.line("    }");
    s.line("};");
    s.blank();
    s.line(format!("void static_arrangement_{lower_name}_init(void)"));
    s.line("{");
    for plan in plans {
        let instance = lower(&plan.name);
        let lower_type = lower(&plan.type_name);
        for state_name in &plan.state_names {
            s.line(format!(
                "    fsm_{lower_type}_{}_init(&fsm_{instance}_{});",
                lower(state_name),
                lower(state_name)
            ));
        }
        s.line(format!("    fsm_{lower_type}_init(&fsm_{instance}_storage);"));
    }
    s.line(format!(
        "    arrangement_{lower_name}_validate(&static_arrangement_{lower_name});"
    ));
    s.line("}");
    Artifact::new(format!("Static_Arrangement_{name}.c"), s.render())
}

pub(super) fn static_main(name: &str) -> Artifact {
    let lower_name = lower(name);
    let mut s = SourceFile::with_banner("static_main.c", C_TOOL_LINE);
    s.line(format!("#include \"Static_Arrangement_{name}.h\""));
    s.blank();
    s.line("int main(void)");
    s.line("{");
    s.line(format!("    static_arrangement_{lower_name}_init();"));
    s.line("    for (;;)");
    s.line("    {");
    s.line(format!(
        "        for (uintptr_t i = 0; i < static_arrangement_{lower_name}.number_of_machines; i++)"
    ));
    s.line(format!(
        "            llfsm_execute_ringlet(static_arrangement_{lower_name}.machines[i]);"
    ));
    s.line("    }");
    s.line("}");
    Artifact::new("static_main.c", s.render())
}

/// Distinct machine types, preserving first-appearance order.
pub(crate) fn distinct_types(plans: &[InstancePlan]) -> Vec<String> {
    let mut seen = Vec::new();
    for plan in plans {
        if !seen.contains(&plan.type_name) {
            seen.push(plan.type_name.clone());
        }
    }
    seen
}

fn capitalised(verb: &str) -> String {
    let mut chars = verb.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

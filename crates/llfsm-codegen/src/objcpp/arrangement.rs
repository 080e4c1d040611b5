//! `Arrangement_<Name>.h/.mm` in the MiCASE shape.
//!
//! Instances are created through the per-machine `CLM_Create_<Type>`
//! factories, with the machine identifier set to the instance index and
//! the machine name to the resolved instance name.

use crate::c::{distinct_types, InstancePlan};
use crate::names::lower;
use crate::output::Artifact;
use crate::sourcery::{SourceFile, OBJCPP_TOOL_LINE};

pub(super) fn header(name: &str, plans: &[InstancePlan]) -> Artifact {
    let count = plans.len();
    let mut s = SourceFile::with_banner(&format!("Arrangement_{name}.h"), OBJCPP_TOOL_LINE);
    s.line(format!("#ifndef clfsm_arrangement_{name}_"));
    s.line(format!("#define clfsm_arrangement_{name}_"));
    s.blank();
    s.line("#include \"CLMachine.h\"");
    for type_name in distinct_types(plans) {
        s.line(format!("#include \"{type_name}.h\""));
    }
    s.blank();
    s.line("namespace FSM");
    s.line("{");
    s.line("    namespace CLM");
    s.line("    {");
    s.line(format!("        class Arrangement_{name}"));
    s.line("        {");
    s.line(format!("            CLMachine *_machines[{count}];"));
    s.line("        public:");
    s.line(format!("            Arrangement_{name}();"));
    s.line(format!("            ~Arrangement_{name}();"));
    s.line("            CLMachine * const *machines() const { return _machines; }");
    s.line(format!(
        "            int numberOfMachines() const {{ return {count}; }}"
    ));
    s.line("        };");
    s.line("    }");
    s.line("}");
    s.blank();
    s.line(format!("#endif // defined(clfsm_arrangement_{name}_)"));
    Artifact::new(format!("Arrangement_{name}.h"), s.render())
}

pub(super) fn source(name: &str, plans: &[InstancePlan]) -> Artifact {
    let mut s = SourceFile::with_banner(&format!("Arrangement_{name}.mm"), OBJCPP_TOOL_LINE);
    s.line(format!("#include \"Arrangement_{name}.h\""));
    s.blank();
    s.line("using namespace FSM;");
    s.line("using namespace CLM;");
    s.blank();
    s.line(format!("Arrangement_{name}::Arrangement_{name}()"));
    s.line("{");
    for (index, plan) in plans.iter().enumerate() {
        s.line(format!(
            "    _machines[{index}] = CLM_Create_{}({index}, \"{}\");",
            plan.type_name, plan.name
        ));
    }
    s.line("}");
    s.blank();
    s.line(format!("Arrangement_{name}::~Arrangement_{name}()"));
    s.line("{");
    s.line(format!(
        "    for (int i = 0; i < {}; i++) delete _machines[i];",
        plans.len()
    ));
    s.line("}");
    Artifact::new(format!("Arrangement_{name}.mm"), s.render())
}

pub(super) fn static_header(name: &str) -> Artifact {
    let lower_name = lower(name);
    let mut s = SourceFile::with_banner(&format!("Static_Arrangement_{name}.h"), OBJCPP_TOOL_LINE);
    s.line(format!("#ifndef clfsm_static_arrangement_{name}_"));
    s.line(format!("#define clfsm_static_arrangement_{name}_"));
    s.blank();
    s.line(format!("#include \"Arrangement_{name}.h\""));
    s.blank();
    s.line("namespace FSM");
    s.line("{");
    s.line("    namespace CLM");
    s.line("    {");
    s.line(format!("        /// The statically constructed {name} arrangement."));
    s.line(format!(
        "        Arrangement_{name} &static_arrangement_{lower_name}();"
    ));
    s.line("    }");
    s.line("}");
    s.blank();
    s.line(format!("#endif // defined(clfsm_static_arrangement_{name}_)"));
    Artifact::new(format!("Static_Arrangement_{name}.h"), s.render())
}

pub(super) fn static_source(name: &str) -> Artifact {
    let lower_name = lower(name);
    let mut s =
        SourceFile::with_banner(&format!("Static_Arrangement_{name}.mm"), OBJCPP_TOOL_LINE);
    s.line(format!("#include \"Static_Arrangement_{name}.h\""));
    s.blank();
    s.line("using namespace FSM;");
    s.line("using namespace CLM;");
    s.blank();
    s.line(format!(
        "Arrangement_{name} &FSM::CLM::static_arrangement_{lower_name}()"
    ));
    s.line("{");
    s.line(format!("    static Arrangement_{name} arrangement;"));
    s.line("    return arrangement;");
    s.line("}");
    Artifact::new(format!("Static_Arrangement_{name}.mm"), s.render())
}

//! `<Name>.h` and `<Name>.mm` in the MiCASE shape.

use llfsm_machine::Machine;

use crate::names::lower;
use crate::output::Artifact;
use crate::plan::EmissionPlan;
use crate::sourcery::{SourceFile, OBJCPP_TOOL_LINE};

pub(super) fn header(name: &str, plan: &EmissionPlan) -> Artifact {
    let count = plan.number_of_states();
    let mut s = SourceFile::with_banner(&format!("{name}.h"), OBJCPP_TOOL_LINE);
    s.line(format!("#ifndef clfsm_machine_{name}_"));
    s.line(format!("#define clfsm_machine_{name}_"));
    s.blank();
    s.line("#include \"CLMachine.h\"");
    s.blank();
    s.line("namespace FSM");
    s.line("{");
    s.line("    class CLState;");
    s.blank();
    s.line("    namespace CLM");
    s.line("    {");
    s.line(format!("        class {name}: public CLMachine"));
    s.line("        {");
    s.line(format!("            CLState *_states[{count}];"));
    s.line("        public:");
    s.line(format!(
        "            {name}(int mid  = 0, const char *name = \"{name}\");"
    ));
    s.line(format!("            virtual ~{name}();"));
    s.line("            virtual CLState * const * states() const { return _states; }");
    s.line(format!(
        "            virtual int numberOfStates() const {{ return {count}; }}"
    ));
    s.line(format!("#           include \"{name}_Variables.h\""));
    s.line(format!("#           include \"{name}_Methods.h\""));
    s.line("        };");
    s.line("    }");
    s.line("}");
    s.blank();
    s.line("extern \"C\"");
    s.line("{");
    s.line(format!(
        "    FSM::CLM::{name} *CLM_Create_{name}(int mid, const char *name);"
    ));
    s.line("}");
    s.blank();
    s.line(format!("#endif // defined(clfsm_machine_{name}_)"));
    Artifact::new(format!("{name}.h"), s.render())
}

pub(super) fn source(name: &str, machine: &Machine, plan: &EmissionPlan) -> Artifact {
    let mut s = SourceFile::with_banner(&format!("{name}.mm"), OBJCPP_TOOL_LINE);
    s.line(format!("#include \"{name}_Includes.h\""));
    s.line(format!("#include \"{name}.h\""));
    for state_name in &plan.state_names {
        s.line(format!("#include \"State_{state_name}.h\""));
    }
    s.blank();
    s.line("using namespace FSM;");
    s.line("using namespace CLM;");
    s.blank();
    s.line("extern \"C\"");
    s.line("{");
    s.line(format!(
        "    {name} *CLM_Create_{name}(int mid, const char *name)"
    ));
    s.line("    {");
    s.line(format!("        return new {name}(mid, name);"));
    s.line("    }");
    s.line("}");
    s.blank();
    s.line(format!("{name}::{name}(int mid, const char *name): CLMachine(mid, name)"));
    s.line("{");
    for (index, state_name) in plan.state_names.iter().enumerate() {
        s.line(format!(
            "    _states[{index}] = new FSM{name}::State::{state_name}(\"{state_name}\");"
        ));
    }
    if let Some(index) = plan.suspend_index(machine) {
        s.line(format!("    setSuspendState(_states[{index}]);"));
    }
    s.line("    setInitialState(_states[0]);");
    s.line("}");
    s.blank();
    s.line(format!("{name}::~{name}()"));
    s.line("{");
    s.line(format!(
        "    for (int i = 0; i < {}; i++) delete _states[i];",
        plan.number_of_states()
    ));
    s.line("}");
    Artifact::new(format!("{name}.mm"), s.render())
}

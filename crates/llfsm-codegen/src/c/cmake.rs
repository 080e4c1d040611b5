//! CMake source-list fragments, plain string interpolation.

use crate::names::{lower, upper};
use crate::output::Artifact;
use crate::plan::EmissionPlan;

use super::arrangement::{distinct_types, InstancePlan};

/// `project.cmake` for one machine: its source list as a CMake variable.
pub(super) fn project_fragment(name: &str, plan: &EmissionPlan) -> Artifact {
    let mut text = String::new();
    text.push_str(&format!(
        "# Sources for the {name} LLFSM.\n# Automatically created using fsmconvert -- do not change manually!\nset({}_SOURCES\n",
        upper(name)
    ));
    text.push_str(&format!("    ${{CMAKE_CURRENT_LIST_DIR}}/Machine_{name}.c\n"));
    text.push_str("    ${CMAKE_CURRENT_LIST_DIR}/Machine_Common.c\n");
    for state_name in &plan.state_names {
        text.push_str(&format!(
            "    ${{CMAKE_CURRENT_LIST_DIR}}/State_{state_name}.c\n"
        ));
    }
    text.push_str(")\n");
    Artifact::new("project.cmake", text)
}

/// `CMakeLists.txt` for one arrangement: a static executable from every
/// machine's sources plus the arrangement and driver files.
pub(super) fn arrangement_lists(name: &str, plans: &[InstancePlan]) -> Artifact {
    let lower_name = lower(name);
    let mut text = String::new();
    text.push_str("# Automatically created using fsmconvert -- do not change manually!\n");
    text.push_str("cmake_minimum_required(VERSION 3.16)\n");
    text.push_str(&format!("project({name} C)\n\n"));
    text.push_str("set(CMAKE_C_STANDARD 11)\n\n");
    for type_name in distinct_types(plans) {
        text.push_str(&format!(
            "include(${{CMAKE_CURRENT_SOURCE_DIR}}/../{type_name}.machine/project.cmake)\n"
        ));
    }
    text.push('\n');
    text.push_str(&format!("add_executable({lower_name}_static\n"));
    text.push_str(&format!("    Arrangement_{name}.c\n"));
    text.push_str(&format!("    Static_Arrangement_{name}.c\n"));
    text.push_str("    static_main.c\n");
    for type_name in distinct_types(plans) {
        text.push_str(&format!("    ${{{}_SOURCES}}\n", upper(&type_name)));
    }
    text.push_str(")\n\n");
    text.push_str(&format!(
        "target_include_directories({lower_name}_static PRIVATE\n"
    ));
    text.push_str("    ${CMAKE_CURRENT_SOURCE_DIR}\n");
    for type_name in distinct_types(plans) {
        text.push_str(&format!(
            "    ${{CMAKE_CURRENT_SOURCE_DIR}}/../{type_name}.machine\n"
        ));
    }
    text.push_str(")\n");
    Artifact::new("CMakeLists.txt", text)
}

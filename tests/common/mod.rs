//! Fixture project shared by the integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub const VERSION_PY: &str = "mlflow/version.py";
pub const PYPROJECT: &str = "pyproject.toml";
pub const PYPROJECT_SKINNY: &str = "pyproject.skinny.toml";
pub const CONSTANTS_TSX: &str = "mlflow/server/js/src/common/constants.tsx";
pub const CLIENT_JAVA: &str = "mlflow/java/client/src/main/java/org/mlflow/MlflowClientVersion.java";
pub const PARENT_POM: &str = "mlflow/java/pom.xml";
pub const SPARK_POM: &str = "mlflow/java/spark/pom.xml";
pub const DESCRIPTION: &str = "mlflow/R/mlflow/DESCRIPTION";

/// A temporary project laid out like the default rule table expects.
pub struct Project {
    dir: TempDir,
}

impl Project {
    /// Creates a project whose canonical version is `version`.
    ///
    /// `version` should be a dev or rc version; Java and R files carry the
    /// matching `-SNAPSHOT` / base forms.
    pub fn new(version: &str) -> Self {
        let base = version
            .trim_end_matches(".dev0")
            .split("rc")
            .next()
            .unwrap()
            .to_string();
        let project = Project {
            dir: TempDir::new().unwrap(),
        };

        project.write(
            VERSION_PY,
            &format!(
                "# Copyright 2018 Databricks, Inc.\nimport re\n\nVERSION = \"{}\"\n",
                version
            ),
        );
        for file in [PYPROJECT, PYPROJECT_SKINNY] {
            project.write(
                file,
                &format!(
                    "[project]\nname = \"mlflow\"\nversion = \"{}\"\n\n[tool.ruff]\ntarget-version = \"py39\"\n",
                    version
                ),
            );
        }
        project.write(
            CONSTANTS_TSX,
            &format!("export const Version = '{}';\n", version),
        );
        project.write(
            CLIENT_JAVA,
            &format!(
                "package org.mlflow;\n\nclass MlflowClientVersion {{\n  static final String VERSION = \"{}-SNAPSHOT\";\n}}\n",
                base
            ),
        );
        project.write(
            PARENT_POM,
            &format!(
                r#"<project>
  <artifactId>mlflow-parent</artifactId>
  <version>{base}-SNAPSHOT</version>
  <properties>
    <mlflow.version>{base}-SNAPSHOT</mlflow.version>
  </properties>
  <dependencies>
    <dependency>
      <artifactId>unrelated-lib</artifactId>
      <version>{base}</version>
    </dependency>
  </dependencies>
</project>
"#,
                base = base
            ),
        );
        project.write(
            SPARK_POM,
            &format!(
                r#"<project>
  <artifactId>mlflow-spark_${{scala.compat.version}}</artifactId>
  <version>{base}-SNAPSHOT</version>
</project>
"#,
                base = base
            ),
        );
        project.write(
            DESCRIPTION,
            &format!("Package: mlflow\nType: Package\nVersion: {}\n", base),
        );

        project
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn write(&self, rel: &str, contents: &str) {
        let path = self.path(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel)).unwrap()
    }

    /// Contents of every fixture file, for before/after comparisons.
    pub fn snapshot(&self) -> Vec<(String, String)> {
        [
            VERSION_PY,
            PYPROJECT,
            PYPROJECT_SKINNY,
            CONSTANTS_TSX,
            CLIENT_JAVA,
            PARENT_POM,
            SPARK_POM,
            DESCRIPTION,
        ]
        .iter()
        .map(|rel| (rel.to_string(), self.read(rel)))
        .collect()
    }
}

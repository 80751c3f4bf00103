//! Graph schema: lookup indexes, vector indexes and the schema description
//! handed to the query translator.

/// Dimensionality of every stored embedding.
pub const EMBEDDING_DIMENSIONS: usize = 1536;

/// Similarity function the vector indexes are built with.
pub const VECTOR_SIMILARITY: &str = "cosine";

pub const LOOKUP_INDEXES: [&str; 3] = [
    "CREATE INDEX IF NOT EXISTS FOR (p:Person) ON (p.email)",
    "CREATE INDEX IF NOT EXISTS FOR (s:Skill) ON (s.name)",
    "CREATE INDEX IF NOT EXISTS FOR (j:Job) ON (j.title)",
];

/// A vector index over one node label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorIndex {
    Person,
    Job,
}

impl VectorIndex {
    pub const ALL: [VectorIndex; 2] = [VectorIndex::Person, VectorIndex::Job];

    pub fn name(self) -> &'static str {
        match self {
            VectorIndex::Person => "resume_vector_index",
            VectorIndex::Job => "job_vector_index",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VectorIndex::Person => "Person",
            VectorIndex::Job => "Job",
        }
    }

    pub fn embedding_property(self) -> &'static str {
        match self {
            VectorIndex::Person => "embedding",
            VectorIndex::Job => "job_embedding",
        }
    }

    /// Property that identifies a node of this label.
    pub fn key_property(self) -> &'static str {
        match self {
            VectorIndex::Person => "email",
            VectorIndex::Job => "title",
        }
    }

    /// Properties whose text is embedded for this label.
    pub fn text_properties(self) -> &'static [&'static str] {
        match self {
            VectorIndex::Person => &["name", "email"],
            VectorIndex::Job => &["title", "description"],
        }
    }

    /// Idempotent-in-effect creation call; an existing index makes it fail
    /// with an "already exists" error, which callers tolerate.
    pub fn create_statement(self) -> String {
        format!(
            "CALL db.index.vector.createNodeIndex('{}', '{}', '{}', {}, '{}')",
            self.name(),
            self.label(),
            self.embedding_property(),
            EMBEDDING_DIMENSIONS,
            VECTOR_SIMILARITY
        )
    }
}

/// Human-readable schema given to the LLM when translating questions.
pub const GRAPH_SCHEMA: &str = "\
# Nodes:
Person {email: STRING, name: STRING}
Skill {name: STRING}
Education {degree: STRING, institution: STRING, graduation_year: INTEGER}
Project {title: STRING}
Role {description: STRING, company: STRING, years: INTEGER, title: STRING}
Job {description: STRING, title: STRING}
# Relationships:
(:Person)-[:HAS_SKILL]->(:Skill)
(:Person)-[:HAS_EDUCATION]->(:Education)
(:Person)-[:HAS_EXPERIENCE]->(:Role)
(:Person)-[:PROJECT_DONE]->(:Project)
(:Job)-[:REQUIRES_SKILL]->(:Skill)
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_vector_index_statement() {
        assert_eq!(
            VectorIndex::Person.create_statement(),
            "CALL db.index.vector.createNodeIndex('resume_vector_index', 'Person', 'embedding', 1536, 'cosine')"
        );
    }

    #[test]
    fn test_job_index_uses_job_embedding_property() {
        let stmt = VectorIndex::Job.create_statement();
        assert!(stmt.contains("'job_vector_index'"));
        assert!(stmt.contains("'job_embedding'"));
    }

    #[test]
    fn test_schema_lists_every_relationship() {
        for rel in [
            "HAS_SKILL",
            "HAS_EDUCATION",
            "HAS_EXPERIENCE",
            "PROJECT_DONE",
            "REQUIRES_SKILL",
        ] {
            assert!(GRAPH_SCHEMA.contains(rel), "schema missing {rel}");
        }
    }
}
